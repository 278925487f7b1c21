//! Compiler options.

use serde::{Deserialize, Serialize};

/// Options applied to a single template compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    /// Identifier the emitted closures bind the render scope to.
    ///
    /// Every free identifier in a template expression resolves against this
    /// name, and `v-for`/`v-slot` closures rebind it. Emitted code uses one
    /// name consistently per compilation unit.
    #[serde(default = "default_scope_ident")]
    pub scope_ident: String,

    /// Interpolation delimiters.
    #[serde(default = "default_delimiters")]
    pub delimiters: (String, String),
}

fn default_scope_ident() -> String {
    "this".to_string()
}

fn default_delimiters() -> (String, String) {
    ("{{".to_string(), "}}".to_string())
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            scope_ident: default_scope_ident(),
            delimiters: default_delimiters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = CompileOptions::default();
        assert_eq!(opts.scope_ident, "this");
        assert_eq!(opts.delimiters.0, "{{");
        assert_eq!(opts.delimiters.1, "}}");
    }
}
