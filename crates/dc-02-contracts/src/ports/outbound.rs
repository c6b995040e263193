//! # Driven Ports (SPI - Outbound)
//!
//! The store view the contracts read from. The Merkle trie behind it is an
//! external collaborator; contracts never write through this port, they
//! return state changes instead.

use crate::domain::Record;
use crate::errors::StoreError;
use shared_types::ObjectId;

/// Read-only view over the versioned key-value store.
///
/// Implementations must be deterministic: the same key always yields the
/// same record for a given snapshot.
pub trait CollectionView: Send + Sync {
    /// Record at `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Record))` - if the key holds a record
    /// * `Ok(None)` - if the key is absent
    fn get(&self, key: &ObjectId) -> Result<Option<Record>, StoreError>;

    /// Whether `key` holds a record.
    fn contains(&self, key: &ObjectId) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: CollectionView + ?Sized> CollectionView for &T {
    fn get(&self, key: &ObjectId) -> Result<Option<Record>, StoreError> {
        (**self).get(key)
    }
}

// =============================================================================
// TESTS
// =============================================================================
