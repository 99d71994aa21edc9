//! Error types for tm-runner

use thiserror::Error;
use tm_core::Version;

/// Unit discovery and invocation errors
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Discovery could not complete (R001)
    #[error("[R001] Migration discovery failed for {location}: {message}")]
    Discovery { location: String, message: String },

    /// A unit's query mode did not print a usable version identifier (R002)
    #[error("[R002] Migration {unit} did not report a valid version identifier (output: {output:?})")]
    InvalidVersionOutput { unit: String, output: String },

    /// Two units declare the same identifier (R003)
    #[error("[R003] Duplicate migration version {version}: {first} and {second}")]
    DuplicateVersion {
        version: Version,
        first: String,
        second: String,
    },

    /// A unit process could not be started at all (R004)
    #[error("[R004] Failed to launch migration {unit}: {source}")]
    LaunchFailed {
        unit: String,
        source: std::io::Error,
    },

    /// No unit with this identifier is in the catalog (R005)
    #[error("[R005] No migration with version {version} in the catalog")]
    UnknownVersion { version: Version },

    /// Filesystem error while scanning for units (R006)
    #[error("[R006] Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for RunnerError
pub type RunnerResult<T> = Result<T, RunnerError>;
