//! # verso
//!
//! verso compiles components written in a Vue-like template dialect into Go
//! source files that render them to HTML strings on the server. This binary
//! is the batch driver around the `verso_atelier` compiler.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "verso")]
#[command(about = "Compile Vue-dialect templates to Go SSR renderers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile template files (default command)
    Build(commands::build::BuildArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Build(args)) => commands::build::run(args),
        None => {
            // Default to build with default args
            commands::build::run(commands::build::BuildArgs::default());
        }
    }
}
