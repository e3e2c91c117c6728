//! Quill CLI - lint agent instruction files, skills and agent definitions
//!
//! Provides `quill lint` and `quill mcp`.

mod commands;
mod tools;

use clap::{ArgAction, Parser, Subcommand};
use commands::lint::LintArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill - lint and score agent instruction files")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint skills, agents and instruction files
    Lint(LintArgs),
    /// Serve the lint tools over MCP on stdin/stdout
    Mcp {
        /// Directory tool calls resolve `targetDir` against
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    // stdout carries reports and MCP frames
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Lint(args) => commands::lint::execute(&args),
        Commands::Mcp { path } => commands::mcp::run(&path).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
