//! Error types for tm-migrate

use thiserror::Error;
use tm_core::{CoreError, Version};
use tm_runner::RunnerError;

/// Orchestrator errors. Every variant ends the run.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Version marker, configuration, or target-range error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Discovery or launch error
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// A unit succeeded but the marker could not be updated (M001).
    ///
    /// The unit's effect has happened and is not recorded. Running again would
    /// re-apply it, so the marker must be corrected by hand.
    #[error(
        "[M001] Migration {version} ran successfully but the version marker at {location} \
         could not be updated to {record}; it still reads {previous}. \
         Set it to {record} by hand before running again: {source}"
    )]
    PersistFailed {
        version: Version,
        record: Version,
        previous: Version,
        location: String,
        source: CoreError,
    },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
