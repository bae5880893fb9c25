//! Generation engine for taskseed.
//!
//! The pipeline runs entity factories in dependency order, threading a
//! single seeded RNG through every sampling call, committing each stage as
//! one storage transaction, and auditing the finished set for invariant
//! violations.

pub mod audit;
pub mod engine;
pub mod errors;
pub mod factories;
pub mod flavor;
pub mod report;
pub mod sampler;

pub use audit::{AuditReport, Violation, ViolationCode};
pub use engine::{GeneratedSet, RunOutcome, SeedEngine};
pub use errors::GenerationError;
pub use flavor::{FlavorProvider, LlmFlavor, NoFlavor};
pub use report::{GenerateOptions, RunReport};
pub use sampler::{DueBucket, Sampler, lognormal_params};
