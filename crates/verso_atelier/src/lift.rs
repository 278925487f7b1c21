//! Semantic lifter.
//!
//! Converts the raw element tree into the semantic [`VueElement`] tree:
//! attributes are classified into their buckets, directive values are parsed
//! into descriptors, and `v-else-if`/`v-else` siblings are linked onto the
//! preceding `v-if` node's chain (and removed from the sibling list).

use verso_carton::{SmallVec, String};

use crate::ast::{Directive, ElseEntry, ElseKind, VFor, VIf, VSlot, VueElement};
use crate::errors::{CompileError, Result};
use crate::parser::Element;

/// Lift a raw element (and its subtree) into the semantic tree.
pub fn lift(raw: &Element) -> Result<VueElement> {
    let mut list = lift_list(std::slice::from_ref(raw))?;
    match list.pop() {
        Some(v) => Ok(v),
        None => Err(CompileError::Internal(
            "lifter produced no root node".into(),
        )),
    }
}

/// Lift a sibling list, threading the if-chain cursor across it.
fn lift_list(elements: &[Element]) -> Result<Vec<VueElement>> {
    let mut out: Vec<VueElement> = Vec::with_capacity(elements.len());
    // Index of the last v-if node at this level; else-variants attach here.
    let mut if_cursor: Option<usize> = None;

    for e in elements {
        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut class: SmallVec<[String; 4]> = SmallVec::new();
        let mut style: Vec<(String, String)> = Vec::new();
        let mut props: Vec<(String, String)> = Vec::new();
        let mut directives: Vec<Directive> = Vec::new();
        let mut v_if: Option<VIf> = None;
        let mut v_for: Option<VFor> = None;
        let mut v_slot: Option<VSlot> = None;
        let mut else_if_condition: Option<String> = None;
        let mut is_else = false;
        let mut v_html: Option<String> = None;
        let mut v_text: Option<String> = None;

        for (name, value) in &e.attrs {
            // Only a single-colon name splits into namespace:key
            let parts: Vec<&str> = name.split(':').collect();
            let (namespace, key) = if parts.len() == 2 {
                (parts[0], parts[1])
            } else {
                ("-", name.as_str())
            };

            if namespace == "v-bind" || namespace.is_empty() {
                // v-bind:x and the :x shorthand
                props.push((key.into(), value.clone()));
            } else if name.starts_with("v-") {
                if key == "v-for" {
                    v_for = Some(parse_v_for(value)?);
                } else if key == "v-if" {
                    v_if = Some(VIf::new(value.trim().into()));
                } else if namespace == "v-slot" {
                    let props_key = if value.is_empty() {
                        "slotProps".into()
                    } else {
                        value.clone()
                    };
                    v_slot = Some(VSlot {
                        slot_name: key.into(),
                        props_key,
                    });
                } else if key == "v-else-if" {
                    else_if_condition = Some(value.trim().into());
                } else if key == "v-else" {
                    is_else = true;
                } else if key == "v-html" {
                    v_html = Some(value.trim().into());
                } else if key == "v-text" {
                    v_text = Some(value.trim().into());
                } else {
                    // Custom directive, with or without an argument
                    let (dir_name, arg) = if namespace != "-" {
                        (namespace.into(), Some(String::from(key)))
                    } else {
                        (key.into(), None)
                    };
                    directives.push(Directive {
                        name: dir_name,
                        value: value.trim().into(),
                        arg,
                    });
                }
            } else if name == "class" {
                for token in value.split_whitespace() {
                    class.push(token.into());
                }
            } else if name == "style" {
                for decl in value.split(';') {
                    let decl = decl.trim();
                    if decl.is_empty() {
                        continue;
                    }
                    // Split on the first colon only, so URL values survive
                    let Some((k, v)) = decl.split_once(':') else {
                        continue;
                    };
                    style.push((k.trim().into(), v.trim().into()));
                }
            } else {
                // Static attribute; namespaced keys are kept whole
                attrs.push((name.clone(), value.clone()));
            }
        }

        if is_else && else_if_condition.is_some() {
            return Err(CompileError::DirectiveShape(
                "an element cannot carry both v-else and v-else-if".into(),
            ));
        }
        if v_if.is_some() && (is_else || else_if_condition.is_some()) {
            return Err(CompileError::DirectiveShape(
                "an element cannot carry v-if together with an else variant".into(),
            ));
        }

        let children = lift_list(&e.children)?;

        let node = VueElement {
            is_root: e.is_root,
            tag_name: e.tag_name.clone(),
            text: e.text.clone(),
            attrs,
            class,
            style,
            props,
            directives,
            children,
            v_if,
            v_for,
            v_slot,
            v_else: is_else,
            v_else_if: else_if_condition.is_some(),
            v_html,
            v_text,
        };

        if node.v_if.is_some() {
            out.push(node);
            if_cursor = Some(out.len() - 1);
        } else if let Some(condition) = else_if_condition {
            let Some(cursor) = if_cursor else {
                return Err(CompileError::DirectiveShape(
                    "v-else-if must follow v-if".into(),
                ));
            };
            chain_target(&mut out, cursor)?.add_entry(ElseEntry {
                kind: ElseKind::ElseIf,
                condition: Some(condition),
                element: node,
            });
        } else if is_else {
            let Some(cursor) = if_cursor.take() else {
                return Err(CompileError::DirectiveShape(
                    "v-else must follow v-if".into(),
                ));
            };
            chain_target(&mut out, cursor)?.add_entry(ElseEntry {
                kind: ElseKind::Else,
                condition: None,
                element: node,
            });
        } else {
            // Any other sibling breaks the chain
            out.push(node);
            if_cursor = None;
        }
    }

    Ok(out)
}

fn chain_target<'a>(out: &'a mut [VueElement], cursor: usize) -> Result<&'a mut VIf> {
    out.get_mut(cursor)
        .and_then(|n| n.v_if.as_mut())
        .ok_or_else(|| {
            CompileError::Internal("if-chain cursor does not point at a v-if node".into())
        })
}

/// Parse a `v-for` operand: `item in list` or `(item, index) in list`.
fn parse_v_for(value: &str) -> Result<VFor> {
    let Some((left, right)) = value.split_once(" in ") else {
        return Err(CompileError::DirectiveShape(format!(
            "v-for expects `item in list`, got `{value}`"
        )));
    };

    let array_key: String = right.trim().into();
    let left = left.trim();

    if left.contains(',') {
        let inner = left.trim_matches(|c| c == '(' || c == ')');
        let mut parts = inner.split(',');
        let item_key = parts.next().unwrap_or("").trim();
        let index_key = parts.next().unwrap_or("").trim();
        Ok(VFor {
            array_key,
            item_key: item_key.into(),
            index_key: index_key.into(),
        })
    } else {
        Ok(VFor {
            array_key,
            item_key: left.into(),
            index_key: "$index".into(),
        })
    }
}
