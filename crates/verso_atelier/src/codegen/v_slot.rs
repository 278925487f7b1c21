//! v-slot emission.

use crate::ast::VSlot;

use super::NamedSlots;

/// Hoist `body` into a named-slot closure.
///
/// The node stops contributing to its parent's default slot (its expression
/// becomes the empty-string literal); instead one entry is added to the
/// named-slot map. The closure rebinds the scope identifier so the slot
/// props are visible under the bound name.
pub fn generate_slot(v_slot: &VSlot, body: &str, scope: &str) -> (String, NamedSlots) {
    let closure = format!(
        "func(props map[string]interface{{}}) string{{
\t{scope} := extendMap(map[string]interface{{}}{{\"{props_key}\": props}}, {scope})
_ = {scope}
return {body}
}}",
        props_key = v_slot.props_key,
    );

    let named = vec![(v_slot.slot_name.to_string(), closure)];
    ("\"\"".to_string(), named)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_replaces_default_contribution() {
        let v_slot = VSlot {
            slot_name: "header".into(),
            props_key: "sp".into(),
        };
        let (code, named) = generate_slot(&v_slot, "\"body\"", "this");
        assert_eq!(code, "\"\"");
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].0, "header");
        assert!(named[0]
            .1
            .contains("this := extendMap(map[string]interface{}{\"sp\": props}, this)"));
        assert!(named[0].1.contains("return \"body\""));
    }
}
