//! # Darc Resolver (Outbound Port)
//!
//! Rule evaluation needs to look up delegated darcs (`darc:<id>` identities).
//! The lookup goes through this trait so the darc model stays free of any
//! store dependency.

use crate::darc::Darc;
use shared_types::DarcId;
use std::collections::HashMap;

/// Looks up the current version of a darc by its base id.
pub trait DarcResolver {
    /// Current darc with base id `id`, or `None` if unknown or unreadable.
    fn resolve(&self, id: &DarcId) -> Option<Darc>;
}

/// Resolver that knows no darcs: delegated identities never hold.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelegation;

impl DarcResolver for NoDelegation {
    fn resolve(&self, _id: &DarcId) -> Option<Darc> {
        None
    }
}

impl DarcResolver for HashMap<DarcId, Darc> {
    fn resolve(&self, id: &DarcId) -> Option<Darc> {
        self.get(id).cloned()
    }
}

impl<R: DarcResolver + ?Sized> DarcResolver for &R {
    fn resolve(&self, id: &DarcId) -> Option<Darc> {
        (**self).resolve(id)
    }
}
