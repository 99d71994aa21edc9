//! Generate command implementation - scaffolds a new migration unit

use anyhow::{Context, Result};
use chrono::Utc;
use tm_gen::MigrationGenerator;

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::load_project;

/// Execute the generate command
pub(crate) async fn execute(args: &GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let generator = MigrationGenerator::from_config(&project.config, &project.root)
        .context("Failed to load migration template")?;
    let generated = generator
        .generate(args.name.as_deref(), Utc::now())
        .context("Failed to generate migration")?;

    println!("New migration generated in '{}'", generated.path.display());
    println!("  Version: {}", generated.version);

    Ok(())
}
