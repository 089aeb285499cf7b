//! UniqDB CLI
//!
//! Command-line demo for UniqDB.
//!
//! # Commands
//!
//! - `demo` - Walk the create/update/delete sequence against an in-memory
//!   store, printing both tables after each stage
//! - `version` - Show version information

mod commands;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// UniqDB command-line tools.
#[derive(Parser)]
#[command(name = "uniqdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the uniqueness-constraint demo against an in-memory store
    Demo,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Demo => {
            commands::demo::run()?;
        }
        Commands::Version => {
            println!("UniqDB CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
