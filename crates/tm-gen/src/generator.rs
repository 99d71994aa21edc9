//! New migration unit scaffolding

use crate::error::{GenError, GenResult};
use chrono::{DateTime, Utc};
use minijinja::{context, Environment};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tm_core::{Config, Version};

/// Default unit template: a POSIX shell script honouring the `-v`, `-up` and
/// `-down` flags.
pub const DEFAULT_TEMPLATE: &str = r#"#!/bin/sh
# Migration {{ version }}{% if name %} ({{ name }}){% endif %}
# Generated by tidemark on {{ created_at }}
set -e

MIGRATION_VERSION={{ version }}

up() {
    echo "upgrading to $MIGRATION_VERSION"
}

down() {
    echo "downgrading from $MIGRATION_VERSION"
}

case "$1" in
    -v) echo "$MIGRATION_VERSION" ;;
    -up) up ;;
    -down) down ;;
    *) echo "usage: $0 -v | -up | -down" >&2; exit 2 ;;
esac
"#;

/// A freshly written unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMigration {
    /// Identifier baked into the unit
    pub version: Version,

    /// File that was created
    pub path: PathBuf,
}

/// Writes new migration units into the migrations directory
#[derive(Debug, Clone)]
pub struct MigrationGenerator {
    dir: PathBuf,
    extension: String,
    template: String,
}

impl MigrationGenerator {
    /// Create a generator using the default template
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Replace the unit template
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Build the generator described by a project configuration
    pub fn from_config(config: &Config, root: &Path) -> GenResult<Self> {
        let generator = Self::new(config.migrations_dir_path(root), config.extension.clone());
        match config.template_path(root) {
            Some(path) => {
                let template = fs::read_to_string(&path).map_err(|e| GenError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                Ok(generator.with_template(template))
            }
            None => Ok(generator),
        }
    }

    /// Largest identifier already used by a file name in the directory.
    ///
    /// Unit files are named `<id>.<ext>` or `<id>_<name>.<ext>`, so the leading
    /// digits of the file name carry the identifier.
    fn max_existing(&self) -> GenResult<Option<u64>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(GenError::Io {
                    path: self.dir.display().to_string(),
                    source: e,
                })
            }
        };

        let mut max = None;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
            if let Ok(id) = digits.parse::<u64>() {
                max = max.max(Some(id));
            }
        }
        Ok(max)
    }

    /// Identifier for a unit created at `now`: its Unix time in seconds,
    /// bumped above every existing identifier.
    pub fn next_version(&self, now: DateTime<Utc>) -> GenResult<Version> {
        let candidate = u64::try_from(now.timestamp()).unwrap_or(0).max(1);
        let next = match self.max_existing()? {
            Some(max) if candidate <= max => max
                .checked_add(1)
                .ok_or(GenError::VersionExhausted { max })?,
            _ => candidate,
        };
        Ok(Version::new(next))
    }

    /// Render the template for `version`
    pub fn render(
        &self,
        version: Version,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> GenResult<String> {
        let env = Environment::new();
        let rendered = env.render_str(
            &self.template,
            context! {
                version => version.get(),
                name => name,
                created_at => now.to_rfc3339(),
            },
        )?;
        Ok(rendered)
    }

    fn file_name(&self, version: Version, name: Option<&str>) -> String {
        let stem = match name {
            Some(name) => format!("{}_{}", version, name),
            None => version.to_string(),
        };
        if self.extension.is_empty() {
            stem
        } else {
            format!("{}.{}", stem, self.extension)
        }
    }

    /// Create a new unit stamped with `now`
    pub fn generate(&self, name: Option<&str>, now: DateTime<Utc>) -> GenResult<GeneratedMigration> {
        if let Some(name) = name {
            validate_name(name)?;
        }

        fs::create_dir_all(&self.dir).map_err(|e| GenError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let version = self.next_version(now)?;
        let content = self.render(version, name, now)?;
        let path = self.dir.join(self.file_name(version, name));

        write_new_file(&path, &content)?;
        make_executable(&path)?;

        log::info!("New migration generated in '{}'", path.display());
        Ok(GeneratedMigration { version, path })
    }
}

fn validate_name(name: &str) -> GenResult<()> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(GenError::InvalidName {
            name: name.to_string(),
        })
    }
}

fn write_new_file(path: &Path, content: &str) -> GenResult<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => GenError::AlreadyExists {
                path: path.display().to_string(),
            },
            _ => GenError::Io {
                path: path.display().to_string(),
                source: e,
            },
        })?;
    file.write_all(content.as_bytes())
        .map_err(|e| GenError::Io {
            path: path.display().to_string(),
            source: e,
        })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> GenResult<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| GenError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> GenResult<()> {
    Ok(())
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
