//! # Adapters Layer
//!
//! Implementations of the outbound ports.
//!
//! - `memory_collection`: in-memory store that applies state changes
//! - `staged_collection`: batch overlay so later instructions see earlier changes
//! - `darc_resolver`: delegated-darc lookup backed by a collection view

pub mod darc_resolver;
pub mod memory_collection;
pub mod staged_collection;

pub use darc_resolver::CollectionResolver;
pub use memory_collection::InMemoryCollection;
pub use staged_collection::StagedCollection;
