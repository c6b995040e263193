//! # In-Memory Collection
//!
//! Reference store used by tests and by callers without a trie backend.
//! Applying state changes here is the boundary where a duplicate `Create`,
//! such as a second genesis, is refused.

use crate::adapters::staged_collection::StagedCollection;
use crate::domain::{Record, StateAction, StateChange};
use crate::errors::StoreError;
use crate::ports::outbound::CollectionView;
use shared_types::ObjectId;
use std::collections::BTreeMap;
use tracing::trace;

/// Ordered in-memory key-value store.
///
/// Cloning yields an independent snapshot.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCollection {
    records: BTreeMap<ObjectId, Record>,
}

impl InMemoryCollection {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies one state change.
    ///
    /// # Errors
    ///
    /// * `AlreadyExists` - `Create` at an occupied key
    /// * `Missing` - `Update` or `Remove` of an absent key
    pub fn apply(&mut self, change: &StateChange) -> Result<(), StoreError> {
        let key = change.object_id;
        let exists = self.records.contains_key(&key);
        match change.action {
            StateAction::Create if exists => return Err(StoreError::AlreadyExists { key }),
            StateAction::Update | StateAction::Remove if !exists => {
                return Err(StoreError::Missing { key })
            }
            _ => {}
        }
        trace!(action = %change.action, %key, contract = %change.contract_id, "applying state change");
        match change.to_record() {
            Some(record) => {
                self.records.insert(key, record);
            }
            None => {
                self.records.remove(&key);
            }
        }
        Ok(())
    }

    /// Applies a list of changes atomically: either all apply or none.
    pub fn apply_all(&mut self, changes: &[StateChange]) -> Result<(), StoreError> {
        let mut staged = StagedCollection::new(&*self);
        staged.stage_all(changes)?;
        let accepted = staged.into_changes();
        for change in &accepted {
            self.apply(change)?;
        }
        Ok(())
    }

    /// Iterates records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Record)> {
        self.records.iter()
    }
}

impl CollectionView for InMemoryCollection {
    fn get(&self, key: &ObjectId) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(key).cloned())
    }
}

// =============================================================================
// TESTS
// =============================================================================
