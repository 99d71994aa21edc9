//! Init command implementation - starts version tracking for a project

use anyhow::{Context, Result};
use std::fs;

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the init command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    project
        .orchestrator()
        .init()
        .context("Failed to initialize migration version control")?;

    let migrations_dir = project.config.migrations_dir_path(&project.root);
    fs::create_dir_all(&migrations_dir).with_context(|| {
        format!(
            "Failed to create migrations directory: {}",
            migrations_dir.display()
        )
    })?;

    println!("Migration version control initialized");
    println!(
        "  Version file:  {}",
        project.config.version_file_path(&project.root).display()
    );
    println!("  Migrations:    {}", migrations_dir.display());
    println!();
    println!("Next steps:");
    println!("  tm generate    # Create a migration");
    println!("  tm up          # Apply pending migrations");

    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
