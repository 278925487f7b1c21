//! Code generation.
//!
//! Recursive walk of the semantic tree. Every node produces a pair of a Go
//! string expression (its rendered fragment) and a named-slot map; parents
//! concatenate child expressions into their default slot and merge the
//! child maps. Structural directives decorate the finished node expression
//! from the inside out: `v-for`, then `v-slot`, then `v-if`, which realizes
//! the slot > if > for precedence.

pub mod options;
pub mod v_for;
pub mod v_if;
pub mod v_slot;

use verso_carton::{escape_go_string, escape_html_attr, go_quote};

use crate::app::App;
use crate::ast::VueElement;
use crate::errors::Result;
use crate::expr::js_to_go;
use crate::options::CompileOptions;

use options::{map_string_to_go_code, slice_string_to_go_code, OptionsGen};

/// Slot name → Go closure expression, in first-insertion order.
pub type NamedSlots = Vec<(String, String)>;

/// Merge `src` into `dst`; an existing name keeps its position but takes
/// the newer closure.
pub(crate) fn merge_named_slots(dst: &mut NamedSlots, src: NamedSlots) {
    for (name, code) in src {
        match dst.iter().position(|(n, _)| *n == name) {
            Some(pos) => dst[pos].1 = code,
            None => dst.push((name, code)),
        }
    }
}

/// The tree walker. Holds the registry and options; the tree itself is
/// never mutated.
pub struct Generator<'a> {
    app: &'a App,
    options: &'a CompileOptions,
}

impl<'a> Generator<'a> {
    pub fn new(app: &'a App, options: &'a CompileOptions) -> Self {
        Generator { app, options }
    }

    pub(crate) fn scope_ident(&self) -> &str {
        &self.options.scope_ident
    }

    /// Generate the expression and named-slot map for one node.
    pub fn generate(&self, el: &VueElement) -> Result<(String, NamedSlots)> {
        let scope = self.scope_ident();
        let mut named_slots: NamedSlots = Vec::new();

        // Children first; else-variants are emitted inside their chain
        let mut default_slot_code = String::new();
        for child in &el.children {
            if child.v_else || child.v_else_if {
                continue;
            }
            let (child_code, child_slots) = self.generate(child)?;
            if !default_slot_code.is_empty() {
                default_slot_code.push('+');
            }
            default_slot_code.push_str(&child_code);
            merge_named_slots(&mut named_slots, child_slots);
        }
        if default_slot_code.is_empty() {
            default_slot_code.push_str("\"\"");
        }

        // v-html / v-text substitute the rendered children
        if let Some(expr) = &el.v_html {
            default_slot_code = format!("interfaceToStr({})", js_to_go(expr, scope)?);
        } else if let Some(expr) = &el.v_text {
            default_slot_code = format!("escapeHtml(interfaceToStr({}))", js_to_go(expr, scope)?);
        }

        let mut ele_code = if self.app.is_registered(&el.tag_name) {
            // Registered component call
            let opts = OptionsGen {
                props: &el.props,
                attrs: &el.attrs,
                class: &el.class,
                style: &el.style,
                default_slot_code: &default_slot_code,
                named_slot_code: &named_slots,
                directives: &el.directives,
            };
            format!(
                "r.Component_{}({})",
                el.tag_name,
                opts.to_go_code(scope)?
            )
        } else if el.is_template() {
            // Transparent group: pass the children through
            default_slot_code.clone()
        } else if el.is_text() {
            self.generate_text(el)?
        } else if el.is_root || !el.directives.is_empty() {
            // Dynamic element: the runtime merges inherited class/style/attrs
            // on root nodes and applies custom directives
            let opts = OptionsGen {
                props: &el.props,
                attrs: &el.attrs,
                class: &el.class,
                style: &el.style,
                default_slot_code: &default_slot_code,
                named_slot_code: &named_slots,
                directives: &el.directives,
            };
            format!(
                "r.Tag(\"{}\", {}, {})",
                el.tag_name,
                el.is_root,
                opts.to_go_code(scope)?
            )
        } else {
            // Static element: plain string concatenation
            let attrs_code = self.generate_static_attrs(el)?;
            format!(
                "\"<{tag}\"+{attrs_code}+\">\"+{default_slot_code}+\"</{tag}>\"",
                tag = el.tag_name,
            )
        };

        // Innermost first: v-for, then v-slot, then v-if
        if let Some(v_for) = &el.v_for {
            ele_code = v_for::generate_for(v_for, &ele_code, scope);
        }
        if let Some(v_slot) = &el.v_slot {
            let (code, slots) = v_slot::generate_slot(v_slot, &ele_code, scope);
            ele_code = code;
            merge_named_slots(&mut named_slots, slots);
        }
        if let Some(v_if) = &el.v_if {
            let (code, slots) = v_if::generate_if(self, v_if, &ele_code)?;
            ele_code = code;
            merge_named_slots(&mut named_slots, slots);
        }

        Ok((ele_code, named_slots))
    }

    /// Emit a text node: a quoted Go literal with every `{{ … }}` replaced
    /// by an `interfaceToStr` splice.
    fn generate_text(&self, el: &VueElement) -> Result<String> {
        let scope = self.scope_ident();
        let (open, close) = (
            self.options.delimiters.0.as_str(),
            self.options.delimiters.1.as_str(),
        );

        let mut out = String::from("\"");
        let mut rest = el.text.as_str();
        loop {
            let Some(start) = rest.find(open) else {
                out.push_str(&escape_go_string(rest));
                break;
            };
            let after_open = &rest[start + open.len()..];
            let Some(end) = after_open.find(close) else {
                // Unterminated delimiter: keep the text verbatim
                out.push_str(&escape_go_string(rest));
                break;
            };

            out.push_str(&escape_go_string(&rest[..start]));
            let go = js_to_go(&after_open[..end], scope)?;
            out.push_str("\"+interfaceToStr(");
            out.push_str(&go);
            out.push_str(")+\"");
            rest = &after_open[end + close.len()..];
        }
        out.push('"');
        Ok(out)
    }

    /// Emit the attribute section of a static element: the space-prefixed
    /// `key="value"` pieces in source order, with static class and style
    /// serialized into their attributes. Dynamic class/style/props are
    /// spliced in through runtime merge helpers so a plain element with
    /// `:class` still renders without a `r.Tag` call.
    fn generate_static_attrs(&self, el: &VueElement) -> Result<String> {
        let scope = self.scope_ident();

        enum AttrPart {
            Static(String),
            Dynamic(String),
        }

        let mut parts: Vec<AttrPart> = Vec::new();
        let push_static = |parts: &mut Vec<AttrPart>, s: &str| {
            if let Some(AttrPart::Static(last)) = parts.last_mut() {
                last.push_str(s);
            } else {
                parts.push(AttrPart::Static(s.to_string()));
            }
        };

        for (name, value) in &el.attrs {
            push_static(
                &mut parts,
                &format!(" {name}=\"{}\"", escape_html_attr(value)),
            );
        }

        let dynamic_class = el.props.iter().find(|(k, _)| k == "class");
        if let Some((_, expr)) = dynamic_class {
            let statics = slice_string_to_go_code(el.class.iter().map(|t| t.as_str()));
            let go = js_to_go(expr, scope)?;
            push_static(&mut parts, " class=\"");
            parts.push(AttrPart::Dynamic(format!("renderClass({statics}, {go})")));
            push_static(&mut parts, "\"");
        } else if !el.class.is_empty() {
            push_static(&mut parts, &format!(" class=\"{}\"", el.class.join(" ")));
        }

        let dynamic_style = el.props.iter().find(|(k, _)| k == "style");
        if let Some((_, expr)) = dynamic_style {
            let statics =
                map_string_to_go_code(el.style.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            let keys = slice_string_to_go_code(el.style.iter().map(|(k, _)| k.as_str()));
            let go = js_to_go(expr, scope)?;
            push_static(&mut parts, " style=\"");
            parts.push(AttrPart::Dynamic(format!(
                "renderStyle({statics}, {keys}, {go})"
            )));
            push_static(&mut parts, "\"");
        } else if !el.style.is_empty() {
            let mut css = String::new();
            for (i, (k, v)) in el.style.iter().enumerate() {
                if i > 0 {
                    css.push_str("; ");
                }
                css.push_str(k);
                css.push_str(": ");
                css.push_str(v);
            }
            push_static(&mut parts, &format!(" style=\"{css}\""));
        }

        for (name, expr) in &el.props {
            if name == "class" || name == "style" {
                continue;
            }
            let go = js_to_go(expr, scope)?;
            parts.push(AttrPart::Dynamic(format!(
                "renderAttr({}, {go})",
                go_quote(name)
            )));
        }

        if parts.is_empty() {
            return Ok("\"\"".to_string());
        }

        let rendered: Vec<String> = parts
            .iter()
            .map(|part| match part {
                AttrPart::Static(s) => go_quote(s),
                AttrPart::Dynamic(code) => code.clone(),
            })
            .collect();
        Ok(rendered.join("+"))
    }
}
