//! Expression transpiler.
//!
//! Translates expressions in the source expression dialect into Go
//! expressions whose free identifiers resolve against a scope identifier.
//! Used for directive values, `{{ … }}` interpolations, and
//! `v-html`/`v-text` bodies.

pub mod emit;
pub mod lexer;
pub mod parser;

pub use parser::{BinaryOp, Expr, ObjectKey, UnaryOp};

use crate::errors::Result;

/// Transpile `src` into a Go expression rooted at `scope_ident`.
///
/// A syntactically invalid expression fails with an error citing the
/// offending source.
pub fn js_to_go(src: &str, scope_ident: &str) -> Result<String> {
    let tokens = lexer::scan(src)?;
    let expr = parser::parse(src, tokens)?;
    Ok(emit::emit(&expr, scope_ident))
}
