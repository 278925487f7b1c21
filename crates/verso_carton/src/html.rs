//! HTML tag configuration tables.

/// Void elements: tags that never have children or a closing tag.
///
/// <https://html.spec.whatwg.org/multipage/syntax.html#void-elements>
pub static VOID_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
};

/// Check if a tag is a void element
#[inline]
pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(tag)
}
