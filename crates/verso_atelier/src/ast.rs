//! Semantic tree node types.
//!
//! The lifter turns the raw element forest into a tree of [`VueElement`]
//! nodes with classified attribute buckets and parsed directive descriptors.
//! The tree is built once per compilation and never mutated afterwards.

use verso_carton::{SmallVec, String};

/// Sentinel tag for pure text nodes.
pub const TEXT_TAG: &str = "__string";

/// Transparent grouping tag; contributes only its children.
pub const TEMPLATE_TAG: &str = "template";

/// A node of the semantic tree.
#[derive(Debug, Clone, Default)]
pub struct VueElement {
    /// True iff this node is the single child of the top-level `template`
    /// wrapper; it inherits the caller's class/style/attrs at render time.
    pub is_root: bool,
    pub tag_name: String,
    /// Only meaningful when `tag_name` is `__string`.
    pub text: String,
    /// Static attributes in source order, excluding class/style/directives
    /// and dynamic props. Namespaced keys (`ns:name`) are kept whole.
    pub attrs: Vec<(String, String)>,
    /// Static class tokens in source order.
    pub class: SmallVec<[String; 4]>,
    /// Static style declarations in source order.
    pub style: Vec<(String, String)>,
    /// Dynamic bindings (`v-bind:x` / `:x`) in source order; may include
    /// `class` and `style`, which the generator extracts separately.
    pub props: Vec<(String, String)>,
    /// Custom `v-*` directives in source order.
    pub directives: Vec<Directive>,
    pub children: Vec<VueElement>,
    pub v_if: Option<VIf>,
    pub v_for: Option<VFor>,
    pub v_slot: Option<VSlot>,
    /// Set on nodes consumed by a preceding `v-if` chain; such nodes are
    /// only ever emitted from inside the chain's conditional ladder.
    pub v_else: bool,
    pub v_else_if: bool,
    pub v_html: Option<String>,
    pub v_text: Option<String>,
}

impl VueElement {
    /// Whether this node is a pure text node.
    pub fn is_text(&self) -> bool {
        self.tag_name == TEXT_TAG
    }

    /// Whether this node is a transparent `template` group.
    pub fn is_template(&self) -> bool {
        self.tag_name == TEMPLATE_TAG
    }
}

/// A custom directive occurrence: `v-animate="e"`, `v-set:arg="e"`.
#[derive(Debug, Clone)]
pub struct Directive {
    /// Directive name as written (`v-animate`, `v-set`).
    pub name: String,
    /// Source expression text; empty when the directive has no value.
    pub value: String,
    /// Argument after the colon, when present (`arg` in `v-set:arg`).
    pub arg: Option<String>,
}

/// `v-if` descriptor: the condition plus the consumed else chain.
#[derive(Debug, Clone)]
pub struct VIf {
    pub condition: String,
    pub chain: Vec<ElseEntry>,
}

impl VIf {
    pub fn new(condition: String) -> Self {
        VIf {
            condition,
            chain: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: ElseEntry) {
        self.chain.push(entry);
    }
}

/// One consumed `v-else-if`/`v-else` sibling. The element is owned here;
/// it no longer appears in its parent's child list.
#[derive(Debug, Clone)]
pub struct ElseEntry {
    pub kind: ElseKind,
    /// Present for `v-else-if`, absent for `v-else`.
    pub condition: Option<String>,
    pub element: VueElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElseKind {
    Else,
    ElseIf,
}

/// `v-for` descriptor parsed from `item in list` / `(item, i) in list`.
#[derive(Debug, Clone)]
pub struct VFor {
    /// Dotted lookup path of the iterated collection.
    pub array_key: String,
    pub item_key: String,
    /// Defaults to `$index` when the template binds no index name.
    pub index_key: String,
}

/// `v-slot:name="propsKey"` descriptor.
#[derive(Debug, Clone)]
pub struct VSlot {
    pub slot_name: String,
    /// Defaults to `slotProps` when the template binds no name.
    pub props_key: String,
}
