//! Tome CLI - content corpus tooling.
//!
//! Provides commands for:
//! - `check`: Load and validate languages
//! - `export`: Write an assembled language as JSON
//! - `list`: Print the category and entry tree
//! - `show`: Print one entry and its neighbours

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, ListArgs, ShowArgs};
use output::Output;

/// Tome - content corpus tooling.
#[derive(Parser)]
#[command(name = "tome", version, about)]
struct Cli {
    /// Enable verbose output (per-language load logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate content.
    Check(CheckArgs),
    /// Export an assembled language as JSON.
    Export(ExportArgs),
    /// List categories and entries.
    List(ListArgs),
    /// Show a single entry.
    Show(ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::List(args) => args.execute(),
        Commands::Show(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
