//! Out-of-process migration units.
//!
//! Each unit is an executable file in the migrations directory. It is invoked
//! through the configured interpreter with one of three flags:
//! - `-v` prints the unit's version identifier and exits zero
//! - `-up` applies the unit
//! - `-down` reverts it
//!
//! Units also receive `TM_MIGRATION_VERSION` and `TM_DIRECTION` in their
//! environment.

use crate::error::{RunnerError, RunnerResult};
use crate::traits::{MigrationUnit, UnitOutput, UnitSource};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, OnceLock};
use tm_core::{Config, Direction, Version};
use tokio::process::Command;

/// Flag that asks a unit to print its version identifier.
pub const VERSION_FLAG: &str = "-v";

static FIRST_INTEGER: OnceLock<Regex> = OnceLock::new();

/// Extract the first decimal integer from a unit's query-mode output.
///
/// Returns `None` when there is no integer, it overflows, or it is 0 (which
/// is reserved for the "nothing applied" marker).
pub fn parse_version_output(output: &str) -> Option<Version> {
    let re = FIRST_INTEGER.get_or_init(|| Regex::new(r"[0-9]+").expect("valid regex"));
    let value: u64 = re.find(output)?.as_str().parse().ok()?;
    (value > 0).then(|| Version::new(value))
}

/// How to start a unit process
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Command prefix; empty runs the unit file directly
    pub interpreter: Vec<String>,

    /// Working directory for unit processes (inherited when `None`)
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    fn command(&self, path: &Path) -> Command {
        let mut cmd = match self.interpreter.split_first() {
            Some((program, args)) => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(path);
                cmd
            }
            None => Command::new(path),
        };
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd
    }
}

/// Captured result of one unit process
struct ProcessOutput {
    success: bool,
    exit_code: Option<i32>,
    output: String,
}

async fn run_process(cmd: &mut Command) -> std::io::Result<ProcessOutput> {
    let output = cmd.output().await?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&stderr);
    }

    Ok(ProcessOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        output: combined,
    })
}

/// A migration unit living in its own executable file
#[derive(Debug, Clone)]
pub struct ScriptUnit {
    version: Version,
    path: PathBuf,
    invocation: Invocation,
}

impl ScriptUnit {
    /// Path of the unit file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the unit in query mode and build it from the reported identifier.
    pub async fn query(path: PathBuf, invocation: Invocation) -> RunnerResult<Self> {
        let result = run_process(invocation.command(&path).arg(VERSION_FLAG))
            .await
            .map_err(|e| RunnerError::Discovery {
                location: path.display().to_string(),
                message: format!("could not run query mode: {e}"),
            })?;

        if !result.success {
            return Err(RunnerError::Discovery {
                location: path.display().to_string(),
                message: format!(
                    "query mode exited with {}:\n{}",
                    describe_exit(result.exit_code),
                    result.output
                ),
            });
        }

        let version =
            parse_version_output(&result.output).ok_or_else(|| RunnerError::InvalidVersionOutput {
                unit: path.display().to_string(),
                output: result.output.clone(),
            })?;

        log::debug!("Discovered migration {} at {}", version, path.display());
        Ok(Self {
            version,
            path,
            invocation,
        })
    }
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

#[async_trait]
impl MigrationUnit for ScriptUnit {
    fn version(&self) -> Version {
        self.version
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn apply(&self, direction: Direction) -> RunnerResult<UnitOutput> {
        let mut cmd = self.invocation.command(&self.path);
        cmd.arg(direction.flag())
            .env("TM_MIGRATION_VERSION", self.version.to_string())
            .env("TM_DIRECTION", direction.to_string());

        let result = run_process(&mut cmd)
            .await
            .map_err(|e| RunnerError::LaunchFailed {
                unit: self.location(),
                source: e,
            })?;

        Ok(UnitOutput {
            success: result.success,
            exit_code: result.exit_code,
            output: result.output,
        })
    }
}

/// Discovers script units in a directory
#[derive(Debug, Clone)]
pub struct ScriptDirectory {
    dir: PathBuf,
    extension: String,
    invocation: Invocation,
}

impl ScriptDirectory {
    /// Create a source scanning `dir` for files with `extension`
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            invocation,
        }
    }

    /// Build the source described by a project configuration
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self::new(
            config.migrations_dir_path(root),
            config.extension.clone(),
            Invocation {
                interpreter: config.interpreter.clone(),
                working_dir: Some(root.to_path_buf()),
            },
        )
    }

    /// Directory being scanned
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_unit_file(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(true, |n| n.starts_with('.'));
        if hidden {
            return false;
        }
        self.extension.is_empty()
            || path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
    }

    /// Candidate unit files, sorted by file name
    pub fn unit_paths(&self) -> RunnerResult<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(RunnerError::Discovery {
                location: self.dir.display().to_string(),
                message: "migrations directory does not exist".to_string(),
            });
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| RunnerError::Io {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| RunnerError::Io {
                path: self.dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if !self.is_unit_file(&path) {
                continue;
            }
            if !path.is_file() {
                log::warn!("Ignoring {}: not a regular file", path.display());
                continue;
            }
            paths.push(path);
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl UnitSource for ScriptDirectory {
    async fn discover(&self) -> RunnerResult<Vec<Arc<dyn MigrationUnit>>> {
        let mut units: Vec<Arc<dyn MigrationUnit>> = Vec::new();
        for path in self.unit_paths()? {
            let unit = ScriptUnit::query(path, self.invocation.clone()).await?;
            units.push(Arc::new(unit));
        }
        Ok(units)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
