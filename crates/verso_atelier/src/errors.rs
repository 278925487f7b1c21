//! Compiler error types.

use thiserror::Error;

/// Errors produced while compiling a template.
///
/// Every error is fatal at compile time; the pipeline makes no attempt at
/// recovery. Runtime failures of the emitted code are the runtime's concern.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Malformed HTML the parser cannot recover from.
    #[error("parse error: {0}")]
    Parse(String),

    /// A structurally invalid directive: a `v-for` operand without ` in `,
    /// or a dangling `v-else`/`v-else-if` with no preceding `v-if`.
    #[error("directive error: {0}")]
    DirectiveShape(String),

    /// The expression transpiler could not parse an expression.
    #[error("expression error: {message} in `{fragment}`")]
    Expression { message: String, fragment: String },

    /// A generator invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),

    /// Template file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    /// Build an [`CompileError::Expression`] citing the offending source.
    pub fn expression(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        CompileError::Expression {
            message: message.into(),
            fragment: fragment.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
