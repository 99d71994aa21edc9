//! State command implementation - prints the current version

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the state command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let version = project
        .orchestrator()
        .current_version()
        .context("Cannot determine current version")?;

    println!("{}", version);
    Ok(())
}
