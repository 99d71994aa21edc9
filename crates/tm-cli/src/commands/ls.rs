//! List command implementation

use anyhow::{Context, Result};
use tm_migrate::Status;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::load_project;

/// Execute the ls command
pub(crate) async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let status = project
        .orchestrator()
        .status()
        .await
        .context("Failed to list migrations")?;

    let listing = Listing::from(&status);
    match args.output {
        LsOutput::Table => print_table(&listing),
        LsOutput::Json => print_json(&listing)?,
    }

    Ok(())
}

/// Catalog snapshot for display
#[derive(Debug, serde::Serialize)]
struct Listing {
    current: u64,
    migrations: Vec<MigrationInfo>,
}

/// One migration for display
#[derive(Debug, serde::Serialize)]
struct MigrationInfo {
    version: u64,
    status: &'static str,
    location: String,
}

impl From<&Status> for Listing {
    fn from(status: &Status) -> Self {
        Self {
            current: status.current.get(),
            migrations: status
                .entries
                .iter()
                .map(|entry| MigrationInfo {
                    version: entry.version.get(),
                    status: if entry.applied { "applied" } else { "pending" },
                    location: entry.location.clone(),
                })
                .collect(),
        }
    }
}

/// Print migrations in table format
fn print_table(listing: &Listing) {
    let version_width = listing
        .migrations
        .iter()
        .map(|m| m.version.to_string().len())
        .max()
        .unwrap_or(7)
        .max(7);
    let status_width = 7;

    println!(
        "{:<version_width$}  {:<status_width$}  LOCATION",
        "VERSION", "STATUS"
    );
    println!(
        "{:-<version_width$}  {:-<status_width$}  {}",
        "",
        "",
        "-".repeat(40)
    );

    for migration in &listing.migrations {
        println!(
            "{:<version_width$}  {:<status_width$}  {}",
            migration.version, migration.status, migration.location
        );
    }

    let applied = listing
        .migrations
        .iter()
        .filter(|m| m.status == "applied")
        .count();
    println!();
    println!(
        "{} migrations ({} applied, {} pending), current version {}",
        listing.migrations.len(),
        applied,
        listing.migrations.len() - applied,
        listing.current
    );
}

/// Print migrations as JSON
fn print_json(listing: &Listing) -> Result<()> {
    let json = serde_json::to_string_pretty(listing).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
