//! # DC-01 Darc - Distributed Access-Rights Control
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Models the evolvable policy documents that decide who may create, modify
//! or evolve any ledger object, including the policies themselves.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Non-empty rule set | `darc.rs` - `Darc::verify()` |
//! | Stable base id | `darc.rs` - `Darc::sanity_check()` |
//! | Version + 1 per evolution | `darc.rs` - `Darc::sanity_check()` |
//! | Old version authorizes the new one | `darc.rs` - `Darc::sanity_check()` |
//! | Bounded delegation, cycles denied | `darc.rs` - `Delegation` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Identity | `identity.rs` | `ed25519:` keys and `darc:` delegation |
//! | Expression | `expression.rs` | `&` / `|` formulas over identities |
//! | Rules | `rules.rs` | Action-to-expression map |
//! | Darc | `darc.rs` | Versioned document, id, verify, evolution |
//! | Resolver | `resolver.rs` | Port for delegated darc lookup |
//! | Signer | `signer.rs` | ed25519 key holder |
//!
//! ## Usage Example
//!
//! ```
//! use dc_01_darc::prelude::*;
//!
//! let alice = Signer::from_seed([1u8; 32]);
//! let genesis = Darc::new(Rules::owned_by(&Expression::single(&alice.identity())), "root");
//! assert!(genesis.verify(true).is_ok());
//!
//! let next = genesis.evolve();
//! assert!(next
//!     .sanity_check(&genesis, &[alice.identity()], &NoDelegation, DEFAULT_DELEGATION_DEPTH)
//!     .is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod darc;
pub mod errors;
pub mod expression;
pub mod identity;
pub mod resolver;
pub mod rules;
pub mod signer;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::darc::{Darc, DarcSignature, DEFAULT_DELEGATION_DEPTH, MAX_ENCODED_DARC};
    pub use crate::errors::DarcError;
    pub use crate::expression::{Expr, Expression};
    pub use crate::identity::Identity;
    pub use crate::resolver::{DarcResolver, NoDelegation};
    pub use crate::rules::{Rules, EVOLVE, SIGN};
    pub use crate::signer::Signer;
}

pub use prelude::*;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
