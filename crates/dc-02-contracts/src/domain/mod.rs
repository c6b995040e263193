//! # Domain Layer (Inner Hexagon)
//!
//! Pure data shapes for contract execution.
//! NO I/O, NO store access.

pub mod entities;
pub mod varint;

pub use entities::*;
pub use varint::*;
