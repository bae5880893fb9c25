use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audit::Violation;

/// Options for a generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Fixed "now" instant; defaults to the wall clock. Pinning it makes a
    /// run fully reproducible for a given seed.
    pub reference_time: Option<DateTime<Utc>>,
}

/// Outcome summary of a successful run: per-kind counts as confirmed by the
/// store, plus any audit findings. Audit findings never fail the run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub duration_ms: u64,
    pub counts: BTreeMap<String, u64>,
    pub violations: Vec<Violation>,
}
