//! # Ports Layer
//!
//! - **Inbound**: the [`Contract`](inbound::Contract) capability every
//!   handler implements, and the closed set of contract kinds.
//! - **Outbound**: the read-only [`CollectionView`](outbound::CollectionView)
//!   over the ledger store.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
