//! In-process migration units.
//!
//! Embedders that compile their migrations together with the orchestrator can
//! register them here instead of shipping one executable per unit. They trade
//! process isolation for speed and type checking; the sequencing contract is
//! the same.

use crate::error::RunnerResult;
use crate::traits::{MigrationUnit, UnitOutput, UnitSource};
use async_trait::async_trait;
use std::sync::Arc;
use tm_core::{Direction, Version};

/// Body of an in-process unit: `Ok(progress)` on success, `Err(reason)` on failure.
pub type UnitFn = Arc<dyn Fn() -> Result<String, String> + Send + Sync>;

/// A migration unit backed by two closures
#[derive(Clone)]
pub struct InProcessUnit {
    version: Version,
    name: String,
    up: UnitFn,
    down: UnitFn,
}

impl InProcessUnit {
    /// Create a unit from its up and down bodies
    pub fn new<U, D>(version: impl Into<Version>, name: impl Into<String>, up: U, down: D) -> Self
    where
        U: Fn() -> Result<String, String> + Send + Sync + 'static,
        D: Fn() -> Result<String, String> + Send + Sync + 'static,
    {
        Self {
            version: version.into(),
            name: name.into(),
            up: Arc::new(up),
            down: Arc::new(down),
        }
    }
}

impl std::fmt::Debug for InProcessUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessUnit")
            .field("version", &self.version)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MigrationUnit for InProcessUnit {
    fn version(&self) -> Version {
        self.version
    }

    fn location(&self) -> String {
        format!("{} ({})", self.name, self.version)
    }

    async fn apply(&self, direction: Direction) -> RunnerResult<UnitOutput> {
        let body = match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        };
        Ok(match body() {
            Ok(output) => UnitOutput {
                success: true,
                exit_code: None,
                output,
            },
            Err(output) => UnitOutput {
                success: false,
                exit_code: None,
                output,
            },
        })
    }
}

/// Units registered in process
#[derive(Default, Clone)]
pub struct Registry {
    units: Vec<Arc<dyn MigrationUnit>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a closure-backed unit
    pub fn register<U, D>(
        self,
        version: impl Into<Version>,
        name: impl Into<String>,
        up: U,
        down: D,
    ) -> Self
    where
        U: Fn() -> Result<String, String> + Send + Sync + 'static,
        D: Fn() -> Result<String, String> + Send + Sync + 'static,
    {
        self.add(Arc::new(InProcessUnit::new(version, name, up, down)))
    }

    /// Register any unit implementation
    pub fn add(mut self, unit: Arc<dyn MigrationUnit>) -> Self {
        self.units.push(unit);
        self
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[async_trait]
impl UnitSource for Registry {
    async fn discover(&self) -> RunnerResult<Vec<Arc<dyn MigrationUnit>>> {
        Ok(self.units.clone())
    }

    fn describe(&self) -> String {
        format!("in-process registry ({} units)", self.units.len())
    }
}
