use thiserror::Error;

use taskseed_core::{ConfigError, EntityKind, StoreError};

/// Errors emitted by the generation pipeline.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("storage failure in {stage} stage: {source}")]
    Store {
        stage: EntityKind,
        source: StoreError,
    },
}

impl GenerationError {
    /// The stage a storage failure happened in, if any.
    pub fn failed_stage(&self) -> Option<EntityKind> {
        match self {
            GenerationError::Store { stage, .. } => Some(*stage),
            GenerationError::Config(_) => None,
        }
    }
}
