//! tm-runner - Migration unit layer for Tidemark
//!
//! This crate provides the `MigrationUnit` trait, two ways of supplying units
//! (executable scripts in a directory, or closures registered in process),
//! the ordered `Catalog`, and the `Runner` that drives one unit at a time.

pub mod catalog;
pub mod error;
pub mod registry;
pub mod runner;
pub mod script;
pub mod traits;

pub use catalog::Catalog;
pub use error::{RunnerError, RunnerResult};
pub use registry::{InProcessUnit, Registry};
pub use runner::{RunReport, Runner};
pub use script::{Invocation, ScriptDirectory, ScriptUnit};
pub use traits::{MigrationUnit, UnitOutput, UnitSource};
