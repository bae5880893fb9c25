//! Core contracts for taskseed.
//!
//! This crate defines the entity records, the configuration surface with its
//! startup validation, the built-in category catalog, and the storage
//! collaborator contract shared by the generation engine and the CLI.

pub mod catalog;
pub mod config;
pub mod entities;
pub mod error;
pub mod store;

pub use catalog::{CategoryProfile, FieldKind, FieldTemplate, TeamSpec};
pub use config::{DatasetSize, Distributions, DueDateTable, FlavorConfig, SimConfig};
pub use entities::{EntityKind, new_id};
pub use error::{ConfigError, StoreError};
pub use store::{MemoryStore, Record, SeedStore, to_record};
