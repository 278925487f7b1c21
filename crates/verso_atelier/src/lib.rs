//! verso_atelier - the verso template compiler.
//!
//! Compiles components written in a Vue-like markup dialect (HTML plus
//! `v-if`/`v-for`/`v-slot`/`v-bind` directives and `{{ … }}` interpolations)
//! into Go source expressions that render the component to an HTML string
//! against a runtime-provided scope.
//!
//! The pipeline: tokenize and parse the markup into a raw tree, lift it into
//! the semantic tree, then walk that tree emitting Go code. Expressions
//! embedded in the template are transpiled by the [`expr`] module.
//!
//! ```
//! use verso_atelier::{compile, App};
//!
//! let app = App::new();
//! let result = compile("<span>Hello {{ name }}</span>", &app).unwrap();
//! assert!(result.code.contains("interfaceToStr(this[\"name\"])"));
//! ```

pub mod app;
pub mod ast;
pub mod codegen;
pub mod errors;
pub mod expr;
pub mod lift;
pub mod options;
pub mod parser;
pub mod tokenizer;

pub use app::App;
pub use codegen::{Generator, NamedSlots};
pub use errors::{CompileError, Result};
pub use options::CompileOptions;

use std::path::Path;

/// Compiler version. Downstream compile caches key on this constant;
/// bumping it invalidates them.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One compiled template.
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// Go string expression producing the rendered HTML fragment.
    pub code: String,
    /// Named-slot closures that reached the top of the tree.
    pub named_slots: NamedSlots,
}

/// Compile template source with default options.
pub fn compile(source: &str, app: &App) -> Result<CompileResult> {
    compile_with_options(source, app, &CompileOptions::default())
}

/// Compile template source.
pub fn compile_with_options(
    source: &str,
    app: &App,
    options: &CompileOptions,
) -> Result<CompileResult> {
    let roots = parser::parse_template(source)?;
    let root = parser::wrap_component_root(roots);
    let tree = lift::lift(&root)?;

    let generator = Generator::new(app, options);
    let (code, named_slots) = generator.generate(&tree)?;

    Ok(CompileResult { code, named_slots })
}

/// Compile a template file.
pub fn compile_file(path: impl AsRef<Path>, app: &App) -> Result<CompileResult> {
    let source = std::fs::read_to_string(path)?;
    compile(&source, app)
}
