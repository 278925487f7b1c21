//! Options-literal emission.
//!
//! Every component call and dynamic tag render receives an `&Options{…}`
//! literal carrying the template-declared bindings plus the caller's own
//! options (`P`). Field order and separators are fixed so that identical
//! templates compile to identical bytes.

use verso_carton::{go_quote, String as CompactString};

use crate::ast::Directive;
use crate::errors::Result;
use crate::expr::js_to_go;

use super::NamedSlots;

/// Inputs for one options literal.
pub struct OptionsGen<'a> {
    pub props: &'a [(CompactString, CompactString)],
    pub attrs: &'a [(CompactString, CompactString)],
    pub class: &'a [CompactString],
    pub style: &'a [(CompactString, CompactString)],
    pub default_slot_code: &'a str,
    pub named_slot_code: &'a NamedSlots,
    pub directives: &'a [Directive],
}

impl OptionsGen<'_> {
    pub fn to_go_code(&self, scope: &str) -> Result<String> {
        let mut c = String::from("&Options{");

        // Dynamic class/style are hoisted out of Props into their own fields
        let mut props: Vec<(&str, &str)> = self
            .props
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        if !props.is_empty() {
            if let Some(pos) = props.iter().position(|(k, _)| *k == "class") {
                let (_, expr) = props.remove(pos);
                c.push_str(&format!("PropsClass: {}, \n", js_to_go(expr, scope)?));
            }
            if let Some(pos) = props.iter().position(|(k, _)| *k == "style") {
                let (_, expr) = props.remove(pos);
                c.push_str(&format!("PropsStyle: {}, \n", js_to_go(expr, scope)?));
            }
            if !props.is_empty() {
                let mut m = String::from("map[string]interface{}{");
                for (k, v) in &props {
                    m.push_str(&format!("{}: {},", go_quote(k), js_to_go(v, scope)?));
                }
                m.push('}');
                c.push_str(&format!("Props: {m}, \n"));
            }
        }

        if !self.attrs.is_empty() {
            let m = map_string_to_go_code(self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            c.push_str(&format!("Attrs: {m},\n"));
        }
        if !self.class.is_empty() {
            let s = slice_to_go_code(self.class.iter().map(|t| t.as_str()));
            c.push_str(&format!("Class: {s},\n"));
        }
        if !self.style.is_empty() {
            let m = map_string_to_go_code(self.style.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            c.push_str(&format!("Style: {m},\n"));
            let keys = slice_to_go_code(self.style.iter().map(|(k, _)| k.as_str()));
            c.push_str(&format!("StyleKeys: {keys},\n"));
        }

        // The default slot is always present, even when empty
        let mut slot: NamedSlots = vec![(
            "default".to_string(),
            format!(
                "func (props map[string]interface{{}})string{{return {}}}",
                self.default_slot_code
            ),
        )];
        for (name, code) in self.named_slot_code {
            match slot.iter().position(|(n, _)| n == name) {
                Some(pos) => slot[pos].1 = code.clone(),
                None => slot.push((name.clone(), code.clone())),
            }
        }
        let mut m = String::from("map[string]namedSlotFunc{");
        for (name, code) in &slot {
            m.push_str(&format!("{}: {},", go_quote(name), code));
        }
        m.push('}');
        c.push_str(&format!("Slot: {m},\n"));

        // Cascade the caller's own options
        c.push_str("P: options,\n");

        if !self.directives.is_empty() {
            let mut dir = String::from("[]directive{\n");
            for d in self.directives {
                let value_code = if d.value.is_empty() {
                    "nil".to_string()
                } else {
                    js_to_go(&d.value, scope)?
                };
                dir.push_str(&format!("{{Name: \"{}\", Value: {value_code}}},\n", d.name));
            }
            dir.push('}');
            c.push_str(&format!("Directives: {dir},\n"));
        }

        c.push('}');
        Ok(c)
    }
}

/// `[]string{"a", "b", }`; callers skip the field entirely when empty.
pub(crate) fn slice_to_go_code<'x>(items: impl Iterator<Item = &'x str>) -> String {
    let mut c = String::from("[]string{");
    for item in items {
        c.push_str(&format!("{}, ", go_quote(item)));
    }
    c.push('}');
    c
}

/// `[]string{"a","b"}`, or `nil` when empty.
pub(crate) fn slice_string_to_go_code<'x>(items: impl Iterator<Item = &'x str>) -> String {
    let quoted: Vec<String> = items.map(go_quote).collect();
    if quoted.is_empty() {
        return "nil".to_string();
    }
    format!("[]string{{{}}}", quoted.join(","))
}

/// `map[string]string{"k": "v",}`, or `nil` when empty.
pub(crate) fn map_string_to_go_code<'x>(
    entries: impl Iterator<Item = (&'x str, &'x str)>,
) -> String {
    let mut c = String::from("map[string]string{");
    let mut any = false;
    for (k, v) in entries {
        c.push_str(&format!("{}: {},", go_quote(k), go_quote(v)));
        any = true;
    }
    if !any {
        return "nil".to_string();
    }
    c.push('}');
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact_pairs(pairs: &[(&str, &str)]) -> Vec<(CompactString, CompactString)> {
        pairs
            .iter()
            .map(|(k, v)| (CompactString::from(*k), CompactString::from(*v)))
            .collect()
    }

    #[test]
    fn test_empty_options_still_carry_default_slot_and_p() {
        let named = NamedSlots::new();
        let gen = OptionsGen {
            props: &[],
            attrs: &[],
            class: &[],
            style: &[],
            default_slot_code: "\"\"",
            named_slot_code: &named,
            directives: &[],
        };
        let code = gen.to_go_code("this").unwrap();
        assert_eq!(
            code,
            "&Options{Slot: map[string]namedSlotFunc{\"default\": func (props map[string]interface{})string{return \"\"},},\nP: options,\n}"
        );
    }

    #[test]
    fn test_dynamic_class_and_style_extracted() {
        let props = compact_pairs(&[("class", "c"), ("style", "s"), ("id", "i")]);
        let named = NamedSlots::new();
        let gen = OptionsGen {
            props: &props,
            attrs: &[],
            class: &[],
            style: &[],
            default_slot_code: "\"\"",
            named_slot_code: &named,
            directives: &[],
        };
        let code = gen.to_go_code("this").unwrap();
        assert!(code.contains("PropsClass: this[\"c\"], \n"));
        assert!(code.contains("PropsStyle: this[\"s\"], \n"));
        assert!(code.contains("Props: map[string]interface{}{\"id\": this[\"i\"],}, \n"));
    }

    #[test]
    fn test_static_buckets_in_order() {
        let attrs = compact_pairs(&[("id", "a"), ("title", "t")]);
        let style = compact_pairs(&[("color", "red"), ("margin", "0")]);
        let class = vec![CompactString::from("x"), CompactString::from("y")];
        let named = NamedSlots::new();
        let gen = OptionsGen {
            props: &[],
            attrs: &attrs,
            class: &class,
            style: &style,
            default_slot_code: "\"\"",
            named_slot_code: &named,
            directives: &[],
        };
        let code = gen.to_go_code("this").unwrap();
        assert!(code.contains("Attrs: map[string]string{\"id\": \"a\",\"title\": \"t\",},\n"));
        assert!(code.contains("Class: []string{\"x\", \"y\", },\n"));
        assert!(code.contains("Style: map[string]string{\"color\": \"red\",\"margin\": \"0\",},\n"));
        assert!(code.contains("StyleKeys: []string{\"color\", \"margin\", },\n"));
    }

    #[test]
    fn test_named_slot_merged_after_default() {
        let named: NamedSlots = vec![("header".to_string(), "func(){}".to_string())];
        let gen = OptionsGen {
            props: &[],
            attrs: &[],
            class: &[],
            style: &[],
            default_slot_code: "\"x\"",
            named_slot_code: &named,
            directives: &[],
        };
        let code = gen.to_go_code("this").unwrap();
        let default_pos = code.find("\"default\"").unwrap();
        let header_pos = code.find("\"header\"").unwrap();
        assert!(default_pos < header_pos);
    }

    #[test]
    fn test_directives_emitted() {
        let directives = vec![Directive {
            name: "v-animate".into(),
            value: "speed".into(),
            arg: None,
        }];
        let named = NamedSlots::new();
        let gen = OptionsGen {
            props: &[],
            attrs: &[],
            class: &[],
            style: &[],
            default_slot_code: "\"\"",
            named_slot_code: &named,
            directives: &directives,
        };
        let code = gen.to_go_code("this").unwrap();
        assert!(code.contains(
            "Directives: []directive{\n{Name: \"v-animate\", Value: this[\"speed\"]},\n},\n"
        ));
    }

    #[test]
    fn test_directive_without_value_is_nil() {
        let directives = vec![Directive {
            name: "v-focus".into(),
            value: "".into(),
            arg: None,
        }];
        let named = NamedSlots::new();
        let gen = OptionsGen {
            props: &[],
            attrs: &[],
            class: &[],
            style: &[],
            default_slot_code: "\"\"",
            named_slot_code: &named,
            directives: &directives,
        };
        let code = gen.to_go_code("this").unwrap();
        assert!(code.contains("{Name: \"v-focus\", Value: nil},\n"));
    }

    #[test]
    fn test_helper_code_shapes() {
        assert_eq!(slice_to_go_code(std::iter::empty::<&str>()), "[]string{}");
        assert_eq!(
            slice_to_go_code(["a", "b"].into_iter()),
            "[]string{\"a\", \"b\", }"
        );
        assert_eq!(slice_string_to_go_code(std::iter::empty::<&str>()), "nil");
        assert_eq!(
            slice_string_to_go_code(["a", "b"].into_iter()),
            "[]string{\"a\",\"b\"}"
        );
        assert_eq!(
            map_string_to_go_code(std::iter::empty::<(&str, &str)>()),
            "nil"
        );
        assert_eq!(
            map_string_to_go_code([("k", "v")].into_iter()),
            "map[string]string{\"k\": \"v\",}"
        );
    }
}
