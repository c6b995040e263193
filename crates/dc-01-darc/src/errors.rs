//! # Error Types
//!
//! All error types raised by the darc model.

use shared_types::DarcId;
use thiserror::Error;

/// Errors from decoding, verifying or evolving a darc.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DarcError {
    /// Bytes could not be decoded into a darc, or a darc could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A darc must carry at least one rule.
    #[error("darc has no rules")]
    EmptyRules,

    /// A rule expression failed to parse.
    #[error("invalid expression {expression:?}: {reason}")]
    InvalidExpression { expression: String, reason: String },

    /// An identity string is malformed.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// An attached signature does not verify.
    #[error("invalid signature from {signer}")]
    InvalidSignature { signer: String },

    /// The evolved darc belongs to another lineage.
    #[error("base id mismatch: expected {expected:?}, got {actual:?}")]
    BaseIdMismatch { expected: DarcId, actual: DarcId },

    /// The evolved darc does not follow the stored version.
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    /// The signers do not satisfy the rule for the action.
    #[error("not authorized for action {action:?}")]
    Unauthorized { action: String },

    /// The darc violates a structural invariant.
    #[error("malformed darc: {0}")]
    Structure(String),
}
