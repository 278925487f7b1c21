//! Build command - compile template files into Go source files.

use clap::{Args, ValueEnum};
use ignore::Walk;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use verso_atelier::{compile_with_options, App, CompileOptions, VERSION};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Output generated Go source
    #[default]
    Go,
    /// Output JSON with code and metadata
    Json,
}

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Directories or .vue files to compile (default: current directory)
    #[arg(default_value = ".")]
    pub inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "./dist")]
    pub output: PathBuf,

    /// Go package name stamped into generated files
    #[arg(short, long, default_value = "ssr")]
    pub package: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "go")]
    pub format: OutputFormat,

    /// Number of threads (default: number of CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Continue on errors
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(Debug)]
struct CompileStats {
    success: AtomicUsize,
    failed: AtomicUsize,
}

#[derive(Debug, serde::Serialize)]
struct CompileOutput {
    filename: String,
    component: String,
    code: String,
}

pub fn run(args: BuildArgs) {
    let start = Instant::now();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .expect("Failed to configure thread pool");
    }

    let files = collect_files(&args.inputs);

    if files.is_empty() {
        eprintln!("No .vue files found under the given inputs");
        std::process::exit(1);
    }

    // Register every component up front so templates can reference siblings
    let mut app = App::new();
    for path in &files {
        app.component(&component_name(path));
    }
    let options = CompileOptions::default();

    let stats = CompileStats {
        success: AtomicUsize::new(0),
        failed: AtomicUsize::new(0),
    };

    let results: Vec<_> = files
        .par_iter()
        .map(|path| match compile_one(path, &app, &options, &args) {
            Ok(output) => {
                stats.success.fetch_add(1, Ordering::Relaxed);
                Some((path.clone(), output))
            }
            Err(e) => {
                stats.failed.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error compiling {}: {}", path.display(), e);

                if !args.continue_on_error {
                    std::process::exit(1);
                }

                None
            }
        })
        .collect();

    fs::create_dir_all(&args.output).expect("Failed to create output directory");

    for (path, output) in results.into_iter().flatten() {
        let ext = match args.format {
            OutputFormat::Go => "vue.go",
            OutputFormat::Json => "vue.json",
        };
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "component".to_string());
        let out_path = args.output.join(format!("{stem}.{ext}"));

        let content = match args.format {
            OutputFormat::Go => output.code,
            OutputFormat::Json => serde_json::to_string_pretty(&output).unwrap_or_default(),
        };

        fs::write(&out_path, content).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {}", out_path.display(), e);
        });
    }

    let elapsed = start.elapsed();
    let success = stats.success.load(Ordering::Relaxed);
    let failed = stats.failed.load(Ordering::Relaxed);

    if failed > 0 {
        eprintln!(
            "✗ {} file(s) failed, {} compiled in {:.4}s",
            failed,
            success,
            elapsed.as_secs_f64()
        );
        std::process::exit(1);
    } else {
        let file_word = if success == 1 { "file" } else { "files" };
        eprintln!(
            "✓ {} {} compiled in {:.4}s",
            success,
            file_word,
            elapsed.as_secs_f64()
        );
    }
}

fn collect_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            if input.extension().is_some_and(|ext| ext == "vue") {
                files.push(input.clone());
            }
            continue;
        }
        for entry in Walk::new(input).flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "vue") {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Component name from the file stem, sanitized to a Go identifier part.
fn component_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "component".to_string());

    let mut name = String::with_capacity(stem.len());
    for (i, c) in stem.chars().enumerate() {
        if c.is_ascii_alphanumeric() {
            if i == 0 && c.is_ascii_digit() {
                name.push('_');
            }
            name.push(c);
        } else {
            name.push('_');
        }
    }
    name
}

fn compile_one(
    path: &PathBuf,
    app: &App,
    options: &CompileOptions,
    args: &BuildArgs,
) -> Result<CompileOutput, String> {
    let source = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let result = compile_with_options(&source, app, options).map_err(|e| e.to_string())?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "anonymous.vue".to_string());
    let component = component_name(path);

    let code = render_go_file(&args.package, &component, &options.scope_ident, &result.code);

    Ok(CompileOutput {
        filename,
        component,
        code,
    })
}

/// Wrap a render expression into a generated Go file.
fn render_go_file(package: &str, component: &str, scope: &str, expr: &str) -> String {
    format!(
        "// Code generated by verso {VERSION}; DO NOT EDIT.\n\n\
         package {package}\n\n\
         func (r *Render) Component_{component}(options *Options) string {{\n\
         \t{scope} := extendMap(map[string]interface{{}}{{}}, options.Props)\n\
         \t_ = {scope}\n\
         \treturn {expr}\n\
         }}\n"
    )
}
