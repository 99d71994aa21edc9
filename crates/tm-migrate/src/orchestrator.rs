//! Upgrade and downgrade sequencing.
//!
//! A run reads the marker once, discovers the catalog, computes a plan and
//! then drives one unit at a time. The marker is rewritten after every
//! successful unit, so a run that stops for any reason (unit failure, launch
//! failure, process kill) leaves it naming exactly the last completed step.

use crate::error::{MigrateError, MigrateResult};
use crate::reporter::{Reporter, SilentReporter};
use std::sync::Arc;
use tm_core::{check_target, Direction, Plan, Target, Version, VersionStore};
use tm_runner::{Catalog, RunReport, Runner, UnitSource};

/// How a run ended, when it did not end in an error
#[derive(Debug, Clone)]
pub enum MigrationOutcome {
    /// Already at the target; nothing was invoked
    NothingToDo { version: Version },

    /// Every planned unit succeeded
    Completed {
        from: Version,
        to: Version,
        applied: Vec<RunReport>,
    },

    /// A unit reported failure; the marker holds `version`, the last
    /// successfully recorded value
    Failed {
        failed: RunReport,
        applied: Vec<RunReport>,
        version: Version,
    },
}

impl MigrationOutcome {
    /// False only for `Failed`
    pub fn is_success(&self) -> bool {
        !matches!(self, MigrationOutcome::Failed { .. })
    }

    /// Marker value at the end of the run
    pub fn version(&self) -> Version {
        match self {
            MigrationOutcome::NothingToDo { version } => *version,
            MigrationOutcome::Completed { to, .. } => *to,
            MigrationOutcome::Failed { version, .. } => *version,
        }
    }

    /// Units that completed successfully during the run
    pub fn applied(&self) -> &[RunReport] {
        match self {
            MigrationOutcome::NothingToDo { .. } => &[],
            MigrationOutcome::Completed { applied, .. } => applied,
            MigrationOutcome::Failed { applied, .. } => applied,
        }
    }
}

/// One catalog entry relative to the current marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub version: Version,
    pub location: String,
    pub applied: bool,
}

/// Snapshot of the marker and the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub current: Version,
    pub entries: Vec<StatusEntry>,
}

/// Sequences migration units against a version marker
pub struct Orchestrator {
    store: Arc<dyn VersionStore>,
    source: Arc<dyn UnitSource>,
    reporter: Arc<dyn Reporter>,
}

impl Orchestrator {
    /// Create an orchestrator over an explicit marker store and unit source
    pub fn new(store: Arc<dyn VersionStore>, source: Arc<dyn UnitSource>) -> Self {
        Self {
            store,
            source,
            reporter: Arc::new(SilentReporter),
        }
    }

    /// Attach a progress reporter
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Create the marker with value 0
    pub fn init(&self) -> MigrateResult<()> {
        self.store.init()?;
        log::info!("Version tracking initialized at {}", self.store.location());
        Ok(())
    }

    /// Read the marker
    pub fn current_version(&self) -> MigrateResult<Version> {
        Ok(self.store.read()?)
    }

    /// Discover every unit
    pub async fn catalog(&self) -> MigrateResult<Catalog> {
        Ok(Catalog::load(self.source.as_ref()).await?)
    }

    /// Marker plus every catalog entry with its applied flag
    pub async fn status(&self) -> MigrateResult<Status> {
        let current = self.current_version()?;
        let catalog = self.catalog().await?;
        let entries = catalog
            .iter()
            .map(|unit| StatusEntry {
                version: unit.version(),
                location: unit.location(),
                applied: unit.version() <= current,
            })
            .collect();
        Ok(Status { current, entries })
    }

    /// Compute the plan a run would execute, without running anything
    pub async fn preview(&self, direction: Direction, target: Target) -> MigrateResult<Plan> {
        let current = self.current_version()?;
        check_target(direction, current, target)?;
        let catalog = self.catalog().await?;
        Ok(Plan::compute(direction, current, target, &catalog.list())?)
    }

    /// Apply pending units in ascending order up to `target`
    pub async fn upgrade(&self, target: Target) -> MigrateResult<MigrationOutcome> {
        self.migrate(Direction::Up, target).await
    }

    /// Revert applied units in descending order down to `target`
    pub async fn downgrade(&self, target: Target) -> MigrateResult<MigrationOutcome> {
        self.migrate(Direction::Down, target).await
    }

    /// Run in `direction` towards `target`
    pub async fn migrate(
        &self,
        direction: Direction,
        target: Target,
    ) -> MigrateResult<MigrationOutcome> {
        let current = self.current_version()?;
        check_target(direction, current, target)?;

        if target == Target::Exact(current) {
            log::info!("Already at version {}, nothing to do", current);
            return Ok(MigrationOutcome::NothingToDo { version: current });
        }

        match (direction, target) {
            (Direction::Up, Target::Full) => log::info!("Upgrading to last known version"),
            (Direction::Down, Target::Full) => log::info!("Downgrading all migrations"),
            (_, Target::Exact(t)) => log::info!("Migrating {} from {} to {}", direction, current, t),
        }

        let catalog = self.catalog().await?;
        let plan = Plan::compute(direction, current, target, &catalog.list())?;
        if plan.is_empty() {
            log::info!("No migrations to run, version stays at {}", current);
            return Ok(MigrationOutcome::NothingToDo { version: current });
        }

        self.reporter.plan_ready(&plan);
        self.execute(&catalog, &plan).await
    }

    async fn execute(&self, catalog: &Catalog, plan: &Plan) -> MigrateResult<MigrationOutcome> {
        let runner = Runner::new(catalog);
        let mut recorded = plan.current;
        let mut applied = Vec::with_capacity(plan.len());

        for step in &plan.steps {
            match step.direction {
                Direction::Up => log::info!("Upgrading to {}", step.version),
                Direction::Down => log::info!("Downgrading {}", step.version),
            }
            self.reporter.step_started(step);

            let report = runner.run(step.version, step.direction).await?;
            self.reporter.step_finished(&report);

            if !report.succeeded {
                log::error!(
                    "Migration {} failed ({}), version stays at {}",
                    step.version,
                    step.direction,
                    recorded
                );
                return Ok(MigrationOutcome::Failed {
                    failed: report,
                    applied,
                    version: recorded,
                });
            }

            self.store
                .write(step.record_after)
                .map_err(|source| MigrateError::PersistFailed {
                    version: step.version,
                    record: step.record_after,
                    previous: recorded,
                    location: self.store.location(),
                    source,
                })?;
            recorded = step.record_after;
            log::info!("Current version saved ({})", recorded);
            self.reporter.version_recorded(recorded);
            applied.push(report);
        }

        Ok(MigrationOutcome::Completed {
            from: plan.current,
            to: recorded,
            applied,
        })
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
