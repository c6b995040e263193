//! # Collection-backed Darc Resolver
//!
//! Resolves `darc:<id>` identities by loading the darc slot of `id`.

use crate::ports::outbound::CollectionView;
use crate::store::load_darc;
use dc_01_darc::{Darc, DarcResolver};
use shared_types::{DarcId, ObjectId};
use tracing::debug;

/// [`DarcResolver`] reading darcs from a collection view.
///
/// Unreadable or malformed darcs resolve to `None`, so the delegated
/// identity simply does not hold.
pub struct CollectionResolver<'a> {
    view: &'a dyn CollectionView,
}

impl<'a> CollectionResolver<'a> {
    /// Wraps a view.
    pub fn new(view: &'a dyn CollectionView) -> Self {
        Self { view }
    }
}

impl DarcResolver for CollectionResolver<'_> {
    fn resolve(&self, id: &DarcId) -> Option<Darc> {
        match load_darc(self.view, &ObjectId::darc_slot(*id)) {
            Ok(darc) => Some(darc),
            Err(err) => {
                debug!(darc = %id, error = %err, "delegated darc not resolvable");
                None
            }
        }
    }
}
