//! Entity factories.
//!
//! Each factory is a pure function from parent entities and sampled values
//! to fully-populated records with freshly minted identifiers. Drawing from
//! an empty pool (no users, no sections, no tags) skips the optional
//! relation instead of failing the batch.

pub mod extras;
pub mod org;
pub mod project;
pub mod task;
