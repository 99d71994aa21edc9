//! Error types for tm-core

use crate::version::Version;
use thiserror::Error;

/// Core error type for Tidemark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: IO error with file path context
    #[error("[E004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// V001: The version marker has never been written
    #[error("[V001] Version tracking is not initialized: '{path}' does not exist. Run `tm init` first")]
    NotInitialized { path: String },

    /// V002: The version marker exists but does not hold a single non-negative integer
    #[error("[V002] Version marker '{path}' is corrupted: expected a single non-negative integer, found {content:?}")]
    Corrupted { path: String, content: String },

    /// V003: The version marker could not be read or written
    #[error("[V003] Version marker '{path}' is not accessible: {source}")]
    MarkerIo {
        path: String,
        source: std::io::Error,
    },

    /// V004: `init` on a marker that already exists
    #[error("[V004] Version tracking is already initialized at '{path}'")]
    AlreadyInitialized { path: String },

    /// P001: Upgrade target lies below the current version
    #[error("[P001] Current version ({current}) is already ahead of target version ({target})")]
    AheadOfTarget { current: Version, target: Version },

    /// P002: Downgrade target lies above the current version
    #[error("[P002] Current version ({current}) is already behind target version ({target})")]
    BehindTarget { current: Version, target: Version },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
