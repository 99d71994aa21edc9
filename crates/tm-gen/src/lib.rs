//! tm-gen - Migration scaffolding for Tidemark
//!
//! Renders new migration units from a minijinja template, stamping each with
//! a unique, increasing identifier derived from the current time.

pub mod error;
pub mod generator;

pub use error::{GenError, GenResult};
pub use generator::{GeneratedMigration, MigrationGenerator, DEFAULT_TEMPLATE};
