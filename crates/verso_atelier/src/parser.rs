//! Raw template tree parser.
//!
//! Drives the [`Tokenizer`] to build the raw element forest the semantic
//! lifter consumes. Text nodes are whitespace-normalized here; comments and
//! `<!doctype>` declarations are dropped.

use verso_carton::{is_void_tag, String};

use crate::ast::{TEMPLATE_TAG, TEXT_TAG};
use crate::errors::{CompileError, Result};
use crate::tokenizer::{Callbacks, QuoteType, TokenizeErrorKind, Tokenizer};

/// Node of the raw tree: an element, or a text run under the `__string` tag.
///
/// This tree is transient; it only exists to be lifted into the semantic
/// tree and is discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag_name: String,
    /// Only meaningful when `tag_name` is `__string`.
    pub text: String,
    /// Attributes in source order, names verbatim (namespaces included).
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// True iff this element is the single child of a top-level `template`.
    pub is_root: bool,
}

impl Element {
    fn text_node(text: String) -> Self {
        Element {
            tag_name: TEXT_TAG.into(),
            text,
            ..Element::default()
        }
    }
}

/// Collapse whitespace in a text run: every run of whitespace (newlines
/// included) becomes a single space. Running this on already-normalized
/// text is a fixed point.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::default();
    let mut prev_ws = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_ws {
                out.push(' ');
            }
            prev_ws = true;
        } else {
            out.push(ch);
            prev_ws = false;
        }
    }
    out
}

/// Parse template source into the raw top-level element forest.
pub fn parse_template(source: &str) -> Result<Vec<Element>> {
    let mut builder = TreeBuilder {
        source,
        stack: Vec::new(),
        roots: Vec::new(),
        current_element: None,
        current_attr_name: None,
        current_attr_value: None,
        error: None,
    };

    let mut tokenizer = Tokenizer::new(source, &mut builder);
    tokenizer.tokenize();

    if let Some(err) = builder.error {
        return Err(err);
    }
    if let Some(open) = builder.stack.last() {
        return Err(CompileError::Parse(format!(
            "missing end tag for <{}>",
            open.tag_name
        )));
    }
    Ok(builder.roots)
}

/// Apply the component-root policy to a parsed forest.
///
/// A forest of exactly one `template` element whose lone child is an element
/// gets that child marked as the component root (it inherits the caller's
/// class/style/attrs). A multi-rooted forest is wrapped in a synthesized
/// `template` and nothing is marked.
pub fn wrap_component_root(mut roots: Vec<Element>) -> Element {
    if roots.len() == 1 {
        let mut root = roots.pop().expect("len checked");
        if root.tag_name == TEMPLATE_TAG
            && root.children.len() == 1
            && root.children[0].tag_name != TEXT_TAG
        {
            root.children[0].is_root = true;
        }
        root
    } else {
        Element {
            tag_name: TEMPLATE_TAG.into(),
            children: roots,
            ..Element::default()
        }
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Element>,
    roots: Vec<Element>,
    current_element: Option<Element>,
    current_attr_name: Option<String>,
    current_attr_value: Option<String>,
    error: Option<CompileError>,
}

impl TreeBuilder<'_> {
    fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }

    fn add_child(&mut self, child: Element) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(child);
        } else {
            self.roots.push(child);
        }
    }

    fn record_error(&mut self, err: CompileError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn finish_open_tag(&mut self) {
        if let Some(element) = self.current_element.take() {
            if is_void_tag(&element.tag_name) {
                self.add_child(element);
            } else {
                self.stack.push(element);
            }
        }
    }
}

impl Callbacks for &mut TreeBuilder<'_> {
    fn on_text(&mut self, start: usize, end: usize) {
        let text = normalize_text(self.slice(start, end));
        if text.is_empty() || text == " " {
            return;
        }
        let node = Element::text_node(text);
        self.add_child(node);
    }

    fn on_open_tag_name(&mut self, start: usize, end: usize) {
        let tag: String = self.slice(start, end).into();
        self.current_element = Some(Element {
            tag_name: tag,
            ..Element::default()
        });
    }

    fn on_open_tag_end(&mut self, _end: usize) {
        self.finish_open_tag();
    }

    fn on_self_closing_tag(&mut self, _end: usize) {
        if let Some(element) = self.current_element.take() {
            self.add_child(element);
        }
    }

    fn on_close_tag(&mut self, start: usize, end: usize) {
        let tag = self.slice(start, end);

        let matching = self
            .stack
            .iter()
            .rposition(|el| el.tag_name.eq_ignore_ascii_case(tag));

        match matching {
            Some(i) => {
                // Anything above the match was left unclosed
                if self.stack.len() - 1 > i {
                    let unclosed = self.stack.last().expect("stack non-empty").tag_name.clone();
                    self.record_error(CompileError::Parse(format!(
                        "missing end tag for <{unclosed}>"
                    )));
                }
                while self.stack.len() > i {
                    let el = self.stack.pop().expect("stack length checked");
                    self.add_child(el);
                }
            }
            None => {
                self.record_error(CompileError::Parse(format!(
                    "unexpected end tag </{tag}>"
                )));
            }
        }
    }

    fn on_attrib_name(&mut self, start: usize, end: usize) {
        self.current_attr_name = Some(self.slice(start, end).into());
    }

    fn on_attrib_data(&mut self, start: usize, end: usize) {
        let data = self.slice(start, end).to_string();
        match self.current_attr_value.as_mut() {
            Some(value) => value.push_str(&data),
            None => self.current_attr_value = Some(data.into()),
        }
    }

    fn on_attrib_end(&mut self, _quote: QuoteType, _end: usize) {
        let value = self.current_attr_value.take().unwrap_or_default();
        if let Some(name) = self.current_attr_name.take() {
            if let Some(element) = self.current_element.as_mut() {
                element.attrs.push((name, value));
            }
        }
    }

    fn on_comment(&mut self, _start: usize, _end: usize) {
        // Comments are dropped
    }

    fn on_end(&mut self) {}

    fn on_error(&mut self, kind: TokenizeErrorKind, index: usize) {
        let message = match kind {
            TokenizeErrorKind::EofInTag => "unexpected end of input inside tag",
            TokenizeErrorKind::EofInComment => "unexpected end of input inside comment",
            TokenizeErrorKind::MissingEndTagName => "missing end tag name",
        };
        self.record_error(CompileError::Parse(format!("{message} at byte {index}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let roots = parse_template("<div></div>").unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].tag_name, "div");
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn test_parse_text_child() {
        let roots = parse_template("<div>hello</div>").unwrap();
        let div = &roots[0];
        assert_eq!(div.children.len(), 1);
        assert_eq!(div.children[0].tag_name, TEXT_TAG);
        assert_eq!(div.children[0].text, "hello");
    }

    #[test]
    fn test_whitespace_normalized() {
        let roots = parse_template("<div>a\n  b</div>").unwrap();
        assert_eq!(roots[0].children[0].text, "a b");
    }

    #[test]
    fn test_whitespace_only_text_dropped() {
        let roots = parse_template("<div>\n  <span></span>\n</div>").unwrap();
        let div = &roots[0];
        assert_eq!(div.children.len(), 1);
        assert_eq!(div.children[0].tag_name, "span");
    }

    #[test]
    fn test_attr_order_preserved() {
        let roots = parse_template(r#"<div id="a" class="x" data-k="v"></div>"#).unwrap();
        let names: Vec<&str> = roots[0].attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["id", "class", "data-k"]);
    }

    #[test]
    fn test_boolean_attr_has_empty_value() {
        let roots = parse_template("<input disabled>").unwrap();
        assert_eq!(roots[0].attrs, vec![("disabled".into(), "".into())]);
    }

    #[test]
    fn test_void_element_no_stack() {
        let roots = parse_template("<div><br>x</div>").unwrap();
        let div = &roots[0];
        assert_eq!(div.children.len(), 2);
        assert_eq!(div.children[0].tag_name, "br");
        assert_eq!(div.children[1].text, "x");
    }

    #[test]
    fn test_comment_dropped() {
        let roots = parse_template("<div><!-- note --></div>").unwrap();
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn test_multiple_roots() {
        let roots = parse_template("<p></p><p></p>").unwrap();
        assert_eq!(roots.len(), 2);
    }

    #[test]
    fn test_unclosed_element_is_error() {
        assert!(parse_template("<div>").is_err());
    }

    #[test]
    fn test_mismatched_close_is_error() {
        assert!(parse_template("<div></span>").is_err());
    }

    #[test]
    fn test_root_marking() {
        let roots = parse_template("<template><div></div></template>").unwrap();
        let root = wrap_component_root(roots);
        assert_eq!(root.tag_name, TEMPLATE_TAG);
        assert!(root.children[0].is_root);
    }

    #[test]
    fn test_no_root_marking_for_multiple_children() {
        let roots = parse_template("<template><div></div><div></div></template>").unwrap();
        let root = wrap_component_root(roots);
        assert!(root.children.iter().all(|c| !c.is_root));
    }

    #[test]
    fn test_multi_root_synthesizes_template() {
        let roots = parse_template("<p></p><p></p>").unwrap();
        let root = wrap_component_root(roots);
        assert_eq!(root.tag_name, TEMPLATE_TAG);
        assert_eq!(root.children.len(), 2);
        assert!(root.children.iter().all(|c| !c.is_root));
    }

    #[test]
    fn test_text_only_root_not_marked() {
        let roots = parse_template("<template>hi</template>").unwrap();
        let root = wrap_component_root(roots);
        assert!(!root.children[0].is_root);
    }

    #[test]
    fn test_normalize_is_fixed_point() {
        let once = normalize_text("a\n   b\tc");
        let twice = normalize_text(once.as_str());
        assert_eq!(once, twice);
        assert_eq!(once, "a b c");
    }
}
