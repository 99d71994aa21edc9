//! Up and down command implementation

use anyhow::{Context, Result};
use tm_core::{Direction, Target};
use tm_migrate::MigrationOutcome;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{describe_exit, format_plan, load_project, ExitCode};

/// Execute `tm up` or `tm down`
pub(crate) async fn execute(
    direction: Direction,
    args: &MigrateArgs,
    global: &GlobalArgs,
) -> Result<()> {
    let project = load_project(global)?;
    let orchestrator = project.orchestrator();
    let target = Target::from_option(args.target);
    let verb = match direction {
        Direction::Up => "Upgrade",
        Direction::Down => "Downgrade",
    };

    if args.dry_run {
        let plan = orchestrator
            .preview(direction, target)
            .await
            .with_context(|| format!("{verb} plan could not be computed"))?;
        if plan.is_empty() {
            println!("Nothing to do: version stays at {}", plan.current);
        } else {
            println!(
                "{verb} plan from version {} ({} migration{}):",
                plan.current,
                plan.len(),
                if plan.len() == 1 { "" } else { "s" }
            );
            for line in format_plan(&plan) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    match (direction, target) {
        (Direction::Up, Target::Full) => println!("Upgrading to last known version"),
        (Direction::Down, Target::Full) => println!("Downgrading all migrations"),
        (_, Target::Exact(t)) => println!("{verb} to version {t}"),
    }

    let outcome = orchestrator
        .migrate(direction, target)
        .await
        .with_context(|| format!("{verb} aborted"))?;

    println!();
    match outcome {
        MigrationOutcome::NothingToDo { version } => {
            println!("Nothing to do: already at version {version}");
            Ok(())
        }
        MigrationOutcome::Completed { from, to, applied } => {
            println!(
                "{verb} complete: {from} -> {to} ({} migration{})",
                applied.len(),
                if applied.len() == 1 { "" } else { "s" }
            );
            Ok(())
        }
        MigrationOutcome::Failed {
            failed,
            applied,
            version,
        } => {
            eprintln!(
                "{verb} failed at migration {} ({}) after {} successful step{}; version remains {}",
                failed.version,
                describe_exit(failed.exit_code),
                applied.len(),
                if applied.len() == 1 { "" } else { "s" },
                version
            );
            Err(ExitCode(1).into())
        }
    }
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
