//! Carton - shared utilities for the verso compiler.
//!
//! This crate provides the foundational types and helpers the rest of the
//! compiler is built on: the small-string and hash-map types used throughout
//! the semantic tree, the HTML tag tables consulted by the parser, and the
//! escaping helpers shared by the parser and the code generator.

pub mod escape;
pub mod html;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_set, Set as PhfSet};

pub use escape::*;
pub use html::*;
