//! # Integration Tests
//!
//! | Module | Covers |
//! |--------|--------|
//! | `genesis_flow` | Genesis, evolution, dispatch and duplicate genesis through the service |
//! | `delegation` | `darc:` identities in evolve rules |
//! | `properties` | Encoding round-trips and lineage rules under proptest |
//! | `concurrency` | Independent snapshots executed on a multi-threaded runtime |

pub mod concurrency;
pub mod delegation;
pub mod genesis_flow;
pub mod properties;
