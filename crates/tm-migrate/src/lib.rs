//! tm-migrate - Migration orchestrator for Tidemark
//!
//! Combines a `VersionStore` and a `UnitSource` into upgrade and downgrade
//! runs that apply one unit at a time and persist the marker after each
//! successful step.

pub mod error;
pub mod orchestrator;
pub mod reporter;

pub use error::{MigrateError, MigrateResult};
pub use orchestrator::{MigrationOutcome, Orchestrator, Status, StatusEntry};
pub use reporter::{Reporter, SilentReporter};
