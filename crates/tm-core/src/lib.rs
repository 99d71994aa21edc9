//! tm-core - Core library for Tidemark
//!
//! This crate provides the shared types used across all Tidemark components:
//! version identifiers, project configuration, the persisted version marker,
//! and migration plan computation.

pub mod config;
pub mod error;
pub mod plan;
pub mod version;
pub mod version_store;

pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use plan::{check_target, Plan, Step};
pub use version::{Direction, Target, Version};
pub use version_store::{FileVersionStore, VersionStore};
