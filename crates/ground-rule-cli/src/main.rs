//! ground-rule CLI tool.
//!
//! Usage:
//! ```bash
//! ground-rule check [OPTIONS] [FILES]...
//! ground-rule list-rules
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

/// Ground-rule checker for C sources and commit titles
#[derive(Parser)]
#[command(name = "ground-rule")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check C files and, optionally, a commit title
    Check(CheckArgs),

    /// List available rules
    ListRules,
}

/// Arguments of the `check` command.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// C files to check, in reporting order
    files: Vec<PathBuf>,

    /// Commit title to lint
    #[arg(short, long)]
    title: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Only run specific rules (comma-separated names)
    #[arg(long, value_delimiter = ',')]
    rules: Vec<String>,

    /// Disable a rule (can be specified multiple times)
    #[arg(short, long)]
    disable: Vec<String>,

    /// Tab depth at which a function is flagged
    #[arg(long, allow_negative_numbers = true)]
    indent_limit: Option<i64>,

    /// Minimum number of constants an enum must have
    #[arg(long, allow_negative_numbers = true)]
    enum_min: Option<i64>,

    /// Exit with status 1 when anything is reported
    #[arg(long)]
    strict: bool,
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Banner-per-file console layout.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
    /// Source snippets with the offending line highlighted.
    Pretty,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => commands::check::run(&args),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(ExitCode::SUCCESS)
        }
    }
}
