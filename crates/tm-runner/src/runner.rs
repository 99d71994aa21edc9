//! Single-unit execution

use crate::catalog::Catalog;
use crate::error::RunnerResult;
use std::time::{Duration, Instant};
use tm_core::{Direction, Version};

/// Result of driving one unit
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Unit that ran
    pub version: Version,

    /// Where the unit lives
    pub location: String,

    /// Mode it ran in
    pub direction: Direction,

    /// Whether the unit reported success
    pub succeeded: bool,

    /// Process exit status, if any
    pub exit_code: Option<i32>,

    /// Captured output
    pub output: String,

    /// Wall-clock time spent in the unit
    pub duration: Duration,
}

/// Runs units from a catalog one at a time
pub struct Runner<'a> {
    catalog: &'a Catalog,
}

impl<'a> Runner<'a> {
    /// Create a runner over `catalog`
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Drive the unit identified by `version` in `direction`.
    ///
    /// A unit that starts and reports failure yields `Ok` with
    /// `succeeded == false`; a unit that cannot be started yields `Err`.
    pub async fn run(&self, version: Version, direction: Direction) -> RunnerResult<RunReport> {
        let unit = self.catalog.get(version)?;
        let start = Instant::now();
        let output = unit.apply(direction).await?;
        let duration = start.elapsed();

        Ok(RunReport {
            version,
            location: unit.location(),
            direction,
            succeeded: output.success,
            exit_code: output.exit_code,
            output: output.output,
            duration,
        })
    }
}
