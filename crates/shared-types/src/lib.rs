//! # Shared Types Crate
//!
//! Identifiers shared across the Darc-Chain crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `DarcId`, `Nonce` and `ObjectId` are defined
//!   only here.
//! - **Compile-time well-known keys**: the reserved nonces and the genesis
//!   reference key are `const` values, never mutable globals.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
