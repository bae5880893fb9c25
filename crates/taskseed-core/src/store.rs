//! Storage collaborator contract.
//!
//! The engine never issues queries: it appends whole batches, one entity
//! kind per stage, inside a begin/commit pair. A failure mid-stage must be
//! rolled back so later readers never observe a half-written stage.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entities::EntityKind;
use crate::error::StoreError;

/// A record crossing the storage boundary: plain attributes keyed by field
/// name.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Serialize an entity into its attribute map.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record, StoreError> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject),
    }
}

/// Transactional append-only store, the unit of atomicity being one stage.
pub trait SeedStore {
    fn begin(&mut self) -> Result<(), StoreError>;
    fn append(&mut self, kind: EntityKind, batch: Vec<Record>) -> Result<(), StoreError>;
    fn commit(&mut self) -> Result<(), StoreError>;
    fn rollback(&mut self) -> Result<(), StoreError>;
    fn count(&self, kind: EntityKind) -> u64;
}

/// In-memory store with staged-versus-committed buffers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    committed: BTreeMap<EntityKind, Vec<Record>>,
    staged: Vec<(EntityKind, Vec<Record>)>,
    in_transaction: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed records of one kind, in insertion order.
    pub fn records(&self, kind: EntityKind) -> &[Record] {
        self.committed.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl SeedStore for MemoryStore {
    fn begin(&mut self) -> Result<(), StoreError> {
        if self.in_transaction {
            return Err(StoreError::NestedTransaction);
        }
        self.in_transaction = true;
        Ok(())
    }

    fn append(&mut self, kind: EntityKind, batch: Vec<Record>) -> Result<(), StoreError> {
        if !self.in_transaction {
            return Err(StoreError::NoTransaction);
        }
        self.staged.push((kind, batch));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.in_transaction {
            return Err(StoreError::NoTransaction);
        }
        for (kind, batch) in self.staged.drain(..) {
            self.committed.entry(kind).or_default().extend(batch);
        }
        self.in_transaction = false;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), StoreError> {
        if !self.in_transaction {
            return Err(StoreError::NoTransaction);
        }
        self.staged.clear();
        self.in_transaction = false;
        Ok(())
    }

    fn count(&self, kind: EntityKind) -> u64 {
        self.committed.get(&kind).map(|batch| batch.len() as u64).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Record {
        let mut map = Record::new();
        map.insert("name".to_string(), serde_json::Value::String(name.to_string()));
        map
    }

    #[test]
    fn commit_makes_batch_visible() {
        let mut store = MemoryStore::new();
        store.begin().unwrap();
        store.append(EntityKind::Teams, vec![record("a"), record("b")]).unwrap();
        assert_eq!(store.count(EntityKind::Teams), 0);
        store.commit().unwrap();
        assert_eq!(store.count(EntityKind::Teams), 2);
    }

    #[test]
    fn rollback_discards_staged_batches() {
        let mut store = MemoryStore::new();
        store.begin().unwrap();
        store.append(EntityKind::Users, vec![record("a")]).unwrap();
        store.rollback().unwrap();
        assert_eq!(store.count(EntityKind::Users), 0);

        store.begin().unwrap();
        store.append(EntityKind::Users, vec![record("b")]).unwrap();
        store.commit().unwrap();
        assert_eq!(store.count(EntityKind::Users), 1);
    }

    #[test]
    fn append_outside_transaction_fails() {
        let mut store = MemoryStore::new();
        let result = store.append(EntityKind::Tags, vec![record("a")]);
        assert!(matches!(result, Err(StoreError::NoTransaction)));
    }

    #[test]
    fn nested_begin_fails() {
        let mut store = MemoryStore::new();
        store.begin().unwrap();
        assert!(matches!(store.begin(), Err(StoreError::NestedTransaction)));
    }
}
