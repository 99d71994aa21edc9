//! Error types for tm-gen

use thiserror::Error;

/// Migration generation errors
#[derive(Error, Debug)]
pub enum GenError {
    /// Template render error (G001)
    #[error("[G001] Migration template error: {0}")]
    Template(String),

    /// Filesystem error (G002)
    #[error("[G002] Failed to write '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Label unusable in a file name (G003)
    #[error("[G003] Invalid migration name '{name}': use letters, digits, '_' and '-' only")]
    InvalidName { name: String },

    /// Target file already exists (G004)
    #[error("[G004] Migration file '{path}' already exists")]
    AlreadyExists { path: String },

    /// No identifier left above the existing ones (G005)
    #[error("[G005] No version identifier available above existing migration {max}")]
    VersionExhausted { max: u64 },
}

/// Result type alias for GenError
pub type GenResult<T> = Result<T, GenError>;

impl From<minijinja::Error> for GenError {
    fn from(err: minijinja::Error) -> Self {
        GenError::Template(err.to_string())
    }
}
