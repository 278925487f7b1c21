//! v-if emission.

use crate::ast::{ElseKind, VIf};
use crate::errors::{CompileError, Result};
use crate::expr::js_to_go;

use super::{merge_named_slots, Generator, NamedSlots};

/// Wrap `body` in an immediately-invoked conditional ladder.
///
/// Chain entries were consumed from the sibling list at lift time; their
/// code is generated here, inside the ladder, and their named-slot maps are
/// merged into the surrounding result. Falling through every branch returns
/// the empty string.
pub fn generate_if(
    generator: &Generator<'_>,
    v_if: &VIf,
    body: &str,
) -> Result<(String, NamedSlots)> {
    let scope = generator.scope_ident();
    let condition = js_to_go(&v_if.condition, scope)?;
    let mut named: NamedSlots = Vec::new();

    let mut code = format!("func ()string{{\nif interfaceToBool({condition}) {{return {body}");

    for entry in &v_if.chain {
        let (ele_code, entry_slots) = generator.generate(&entry.element)?;
        merge_named_slots(&mut named, entry_slots);
        match entry.kind {
            ElseKind::Else => {
                code.push_str(&format!("}} else {{ return {ele_code}"));
            }
            ElseKind::ElseIf => {
                let condition = entry.condition.as_deref().ok_or_else(|| {
                    CompileError::Internal("else-if chain entry without a condition".into())
                })?;
                let condition = js_to_go(condition, scope)?;
                code.push_str(&format!(
                    "}} else if interfaceToBool({condition}) {{ return {ele_code}"
                ));
            }
        }
    }

    code.push_str("\n}\nreturn \"\"\n}()");
    Ok((code, named))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::ast::{ElseEntry, VueElement};
    use crate::options::CompileOptions;

    fn text_element(text: &str) -> VueElement {
        VueElement {
            tag_name: crate::ast::TEXT_TAG.into(),
            text: text.into(),
            ..VueElement::default()
        }
    }

    #[test]
    fn test_ladder_shape() {
        let app = App::new();
        let options = CompileOptions::default();
        let generator = Generator::new(&app, &options);

        let mut v_if = VIf::new("a".into());
        v_if.add_entry(ElseEntry {
            kind: ElseKind::ElseIf,
            condition: Some("b".into()),
            element: text_element("B"),
        });
        v_if.add_entry(ElseEntry {
            kind: ElseKind::Else,
            condition: None,
            element: text_element("C"),
        });

        let (code, named) = generate_if(&generator, &v_if, "\"A\"").unwrap();
        assert!(named.is_empty());
        assert_eq!(
            code,
            "func ()string{\nif interfaceToBool(this[\"a\"]) {return \"A\"} else if interfaceToBool(this[\"b\"]) { return \"B\"} else { return \"C\"\n}\nreturn \"\"\n}()"
        );
    }

    #[test]
    fn test_chain_entry_without_condition_is_internal_error() {
        let app = App::new();
        let options = CompileOptions::default();
        let generator = Generator::new(&app, &options);

        let mut v_if = VIf::new("a".into());
        v_if.add_entry(ElseEntry {
            kind: ElseKind::ElseIf,
            condition: None,
            element: text_element("B"),
        });

        let err = generate_if(&generator, &v_if, "\"A\"").unwrap_err();
        assert!(matches!(err, CompileError::Internal(_)));
    }
}
