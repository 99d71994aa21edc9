//! Configuration types and parsing for tidemark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched for in a project directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tidemark.yml", "tidemark.yaml"];

/// Project configuration from tidemark.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File holding the version marker
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Directory scanned for migration units
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Command prefix used to invoke a unit (`["sh"]` runs `sh <unit> -up`).
    ///
    /// An empty list executes the unit file directly.
    #[serde(default = "default_interpreter")]
    pub interpreter: Vec<String>,

    /// File extension (without the dot) that marks a file as a migration unit.
    ///
    /// An empty string accepts every regular file.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Custom minijinja template for `tm generate`
    #[serde(default)]
    pub template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version_file: default_version_file(),
            migrations_dir: default_migrations_dir(),
            interpreter: default_interpreter(),
            extension: default_extension(),
            template: None,
        }
    }
}

fn default_version_file() -> String {
    "version.state".to_string()
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_interpreter() -> Vec<String> {
    vec!["sh".to_string()]
}

fn default_extension() -> String {
    "sh".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for tidemark.yml or tidemark.yaml and falls back to the defaults
    /// when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        log::debug!(
            "No {} in {}, using default configuration",
            CONFIG_FILE_NAMES[0],
            dir.display()
        );
        Ok(Self::default())
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.version_file.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "version_file cannot be empty".to_string(),
            });
        }
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }
        if self.extension.starts_with('.') {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "extension '{}' must not start with '.'; use '{}'",
                    self.extension,
                    self.extension.trim_start_matches('.')
                ),
            });
        }
        Ok(())
    }

    /// Absolute-or-project-relative path of the version marker
    pub fn version_file_path(&self, root: &Path) -> PathBuf {
        root.join(&self.version_file)
    }

    /// Absolute-or-project-relative path of the migrations directory
    pub fn migrations_dir_path(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Path of the custom unit template, if one is configured
    pub fn template_path(&self, root: &Path) -> Option<PathBuf> {
        self.template.as_ref().map(|t| root.join(t))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
