//! Persistence of the version marker.
//!
//! The marker is a small text file holding exactly one non-negative decimal
//! integer: the version of the most recent fully-applied migration, or 0.

use crate::error::{CoreError, CoreResult};
use crate::version::Version;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Durable storage for the version marker.
pub trait VersionStore: Send + Sync {
    /// Read the current marker.
    ///
    /// Fails with `NotInitialized` when no marker exists, `Corrupted` when the
    /// content is not a single non-negative integer, and `MarkerIo` otherwise.
    fn read(&self) -> CoreResult<Version>;

    /// Replace the marker. Readers never observe a partial value.
    fn write(&self, version: Version) -> CoreResult<()>;

    /// Create the marker with value 0. Fails if it already exists.
    fn init(&self) -> CoreResult<()>;

    /// Human-readable location for reports
    fn location(&self) -> String;
}

/// File-backed version marker
#[derive(Debug, Clone)]
pub struct FileVersionStore {
    path: PathBuf,
}

impl FileVersionStore {
    /// Create a store for the marker at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the marker file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: io::Error) -> CoreError {
        CoreError::MarkerIo {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Write to a sibling temp file, fsync it, then rename over the marker.
    fn replace(&self, version: Version) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(version.to_string().as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        sync_parent_dir(&self.path);
        Ok(())
    }
}

/// Flush the directory entry after a rename. Not all platforms allow opening a
/// directory, so failures are only logged.
fn sync_parent_dir(path: &Path) {
    #[cfg(unix)]
    {
        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => p,
            None => Path::new("."),
        };
        if let Err(e) = fs::File::open(parent).and_then(|dir| dir.sync_all()) {
            log::debug!("Could not fsync {}: {}", parent.display(), e);
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

/// Parse marker content: one non-negative decimal integer, surrounding
/// whitespace allowed.
pub fn parse_marker(content: &str) -> Option<Version> {
    let trimmed = content.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

impl VersionStore for FileVersionStore {
    fn read(&self) -> CoreResult<Version> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CoreError::NotInitialized {
                    path: self.path.display().to_string(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(CoreError::Corrupted {
                    path: self.path.display().to_string(),
                    content: "<non-UTF-8 data>".to_string(),
                })
            }
            Err(e) => return Err(self.io_error(e)),
        };

        parse_marker(&content).ok_or_else(|| CoreError::Corrupted {
            path: self.path.display().to_string(),
            content,
        })
    }

    fn write(&self, version: Version) -> CoreResult<()> {
        self.replace(version).map_err(|e| self.io_error(e))?;
        log::debug!("Version marker {} set to {}", self.path.display(), version);
        Ok(())
    }

    fn init(&self) -> CoreResult<()> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => {
                return Err(CoreError::AlreadyInitialized {
                    path: self.path.display().to_string(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }
        self.write(Version::ZERO)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[path = "version_store_test.rs"]
mod tests;
