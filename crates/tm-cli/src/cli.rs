//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tidemark - ordered, versioned migration runner
#[derive(Parser, Debug)]
#[command(name = "tm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Prefix log records with date and time
    #[arg(long, global = true)]
    pub timestamps: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize version tracking (version marker set to 0)
    Init,

    /// Generate a new migration unit
    Generate(GenerateArgs),

    /// Apply migrations up to --target, or all pending migrations
    Up(MigrateArgs),

    /// Revert migrations down to --target, or all applied migrations
    Down(MigrateArgs),

    /// Print the current version
    State,

    /// List migrations and whether they are applied
    Ls(LsArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Optional label appended to the file name
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the up and down commands
#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    /// Version to stop at
    #[arg(short, long)]
    pub target: Option<u64>,

    /// Print the plan without running anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
