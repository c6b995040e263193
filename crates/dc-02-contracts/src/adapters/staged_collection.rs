//! # Staged Collection
//!
//! Overlay of pending state changes on top of a read-only view. The execution
//! service stages each accepted instruction here so later instructions in the
//! same batch observe earlier writes, without touching the base store.

use crate::domain::{Record, StateAction, StateChange};
use crate::errors::StoreError;
use crate::ports::outbound::CollectionView;
use shared_types::ObjectId;
use std::collections::BTreeMap;

/// Read-your-writes overlay.
///
/// `pending` maps a key to its staged record, or to `None` once removed.
pub struct StagedCollection<'a> {
    base: &'a dyn CollectionView,
    pending: BTreeMap<ObjectId, Option<Record>>,
    changes: Vec<StateChange>,
}

impl<'a> StagedCollection<'a> {
    /// Empty overlay over `base`.
    pub fn new(base: &'a dyn CollectionView) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
            changes: Vec::new(),
        }
    }

    /// Stages one change with the same existence rules as a real store.
    pub fn stage(&mut self, change: &StateChange) -> Result<(), StoreError> {
        self.stage_entry(change).map(|_| ())
    }

    /// Stages every change or, on the first failure, none of them.
    pub fn stage_all(&mut self, changes: &[StateChange]) -> Result<(), StoreError> {
        let staged = self.changes.len();
        let mut undo = Vec::with_capacity(changes.len());
        for change in changes {
            match self.stage_entry(change) {
                Ok(previous) => undo.push((change.object_id, previous)),
                Err(err) => {
                    // Newest first, so a key touched twice ends at its oldest entry.
                    for (key, previous) in undo.into_iter().rev() {
                        match previous {
                            Some(entry) => self.pending.insert(key, entry),
                            None => self.pending.remove(&key),
                        };
                    }
                    self.changes.truncate(staged);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    /// Stages `change`, returning the overlay entry it replaced.
    fn stage_entry(
        &mut self,
        change: &StateChange,
    ) -> Result<Option<Option<Record>>, StoreError> {
        let key = change.object_id;
        let exists = self.get(&key)?.is_some();
        match change.action {
            StateAction::Create if exists => return Err(StoreError::AlreadyExists { key }),
            StateAction::Update | StateAction::Remove if !exists => {
                return Err(StoreError::Missing { key })
            }
            _ => {}
        }
        let previous = self.pending.insert(key, change.to_record());
        self.changes.push(change.clone());
        Ok(previous)
    }

    /// Changes staged so far, in order.
    #[must_use]
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    /// Consumes the overlay, returning the staged changes.
    #[must_use]
    pub fn into_changes(self) -> Vec<StateChange> {
        self.changes
    }
}

impl CollectionView for StagedCollection<'_> {
    fn get(&self, key: &ObjectId) -> Result<Option<Record>, StoreError> {
        match self.pending.get(key) {
            Some(staged) => Ok(staged.clone()),
            None => self.base.get(key),
        }
    }
}
