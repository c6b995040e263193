//! # Error Types
//!
//! Errors raised while building identifiers from untrusted bytes or text.

use thiserror::Error;

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Raw byte input had the wrong length.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Hex input could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
