//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tm_core::{Config, Direction, FileVersionStore, Plan, Step, Version};
use tm_migrate::{Orchestrator, Reporter};
use tm_runner::{RunReport, ScriptDirectory};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: the command already printed its report.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Width of the rule framing a unit's captured output.
const RULE_WIDTH: usize = 120;

/// Loaded project: root directory plus configuration
#[derive(Debug, Clone)]
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    /// Marker store at the configured path
    pub(crate) fn store(&self) -> FileVersionStore {
        FileVersionStore::new(self.config.version_file_path(&self.root))
    }

    /// Script units in the configured directory
    pub(crate) fn source(&self) -> ScriptDirectory {
        ScriptDirectory::from_config(&self.config, &self.root)
    }

    /// Orchestrator wired to this project, printing progress to stdout
    pub(crate) fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(Arc::new(self.store()), Arc::new(self.source()))
            .with_reporter(Arc::new(ConsoleReporter))
    }
}

/// Load the project configuration from global arguments
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();
    if !root.is_dir() {
        anyhow::bail!("Project directory not found: {}", root.display());
    }

    let config = match &global.config {
        Some(path) => Config::load(path).context("Failed to load configuration file")?,
        None => Config::load_from_dir(&root).context("Failed to load project configuration")?,
    };
    log::debug!(
        "Loaded project at {}: version file {}, migrations in {}",
        root.display(),
        config.version_file,
        config.migrations_dir
    );

    Ok(Project { root, config })
}

/// Prints each step and the unit's captured output as a run progresses
pub(crate) struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn step_started(&self, step: &Step) {
        match step.direction {
            Direction::Up => println!("Upgrading to {}", step.version),
            Direction::Down => println!("Downgrading {}", step.version),
        }
    }

    fn step_finished(&self, report: &RunReport) {
        println!("Took {:.3?}", report.duration);
        println!("Migration output :");
        print_output_frame(&report.output);
        if !report.succeeded {
            println!(
                "Migration {} failed ({})",
                report.version,
                describe_exit(report.exit_code)
            );
        }
    }

    fn version_recorded(&self, version: Version) {
        println!("Current version saved to state file ({})", version);
    }
}

/// Print captured unit output between two horizontal rules
pub(crate) fn print_output_frame(output: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", rule);
    if !output.is_empty() {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }
    println!("{}", rule);
}

/// Human-readable exit status of a unit
pub(crate) fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status".to_string(),
    }
}

/// Render a plan as one line per step
pub(crate) fn format_plan(plan: &Plan) -> Vec<String> {
    plan.steps
        .iter()
        .map(|step| {
            format!(
                "  {:<5} {:>12}  -> version {}",
                step.direction.to_string(),
                step.version.to_string(),
                step.record_after
            )
        })
        .collect()
}
