//! Migration unit trait definitions

use crate::error::RunnerResult;
use async_trait::async_trait;
use std::sync::Arc;
use tm_core::{Direction, Version};

/// What a unit reported after being driven up or down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutput {
    /// Whether the unit reported success (exit status zero)
    pub success: bool,

    /// Exit status, when the unit ran as a process that exited normally
    pub exit_code: Option<i32>,

    /// Combined progress and error output
    pub output: String,
}

/// A single independently identified migration step.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait MigrationUnit: Send + Sync {
    /// Declared version identifier
    fn version(&self) -> Version;

    /// Where the unit lives, for reports (a file path or a registered name)
    fn location(&self) -> String;

    /// Drive the unit in `direction`.
    ///
    /// `Ok` with `success == false` means the unit ran and reported failure.
    /// `Err` means it could not be started at all.
    async fn apply(&self, direction: Direction) -> RunnerResult<UnitOutput>;
}

/// Somewhere migration units can be discovered from
#[async_trait]
pub trait UnitSource: Send + Sync {
    /// Discover every unit. Any unit that cannot report its identifier fails
    /// the whole discovery.
    async fn discover(&self) -> RunnerResult<Vec<Arc<dyn MigrationUnit>>>;

    /// Human-readable description for reports
    fn describe(&self) -> String;
}
