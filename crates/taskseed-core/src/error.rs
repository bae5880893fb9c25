use thiserror::Error;

/// Fatal configuration problems, detected before any generation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("distribution '{name}' must sum to 1.0, got {sum}")]
    DistributionSum { name: &'static str, sum: f64 },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    ProbabilityRange { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("peak day set is empty")]
    EmptyPeakDays,
    #[error("peak day {0} is not a weekday index (0 = Monday .. 6 = Sunday)")]
    InvalidPeakDay(u8),
    #[error("{0} must be at least 1")]
    EmptyPool(&'static str),
    #[error("category catalog is empty")]
    EmptyCatalog,
}

/// Failures at the storage collaborator boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no transaction in progress")]
    NoTransaction,
    #[error("transaction already in progress")]
    NestedTransaction,
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("entity did not serialize to an object record")]
    NotAnObject,
    #[error("storage backend error: {0}")]
    Backend(String),
}
