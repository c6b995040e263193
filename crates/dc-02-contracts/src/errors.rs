//! # Error Types
//!
//! All error types for contract execution. Every failure is local to the
//! instruction that caused it.

use dc_01_darc::DarcError;
use shared_types::{DarcId, ObjectId};
use thiserror::Error;

// =============================================================================
// CONTRACT ERRORS
// =============================================================================

/// Why a single instruction was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// No record at the key.
    #[error("object not found: {key:?}")]
    NotFound { key: ObjectId },

    /// Stored contract kind differs from the expected one.
    #[error("wrong contract kind at {key:?}: expected {expected}, got {actual}")]
    WrongContractKind {
        key: ObjectId,
        expected: String,
        actual: String,
    },

    /// A value could not be decoded or has the wrong shape.
    #[error("malformed {context}: {reason}")]
    MalformedRecord { context: String, reason: String },

    /// A genesis darc without rules.
    #[error("don't accept darc with empty rules")]
    EmptyPolicy,

    /// Structural or signature check of a darc failed.
    #[error("darc verification failed: {0}")]
    PolicyVerificationFailed(String),

    /// Missing, oversized or meaningless argument.
    #[error("invalid argument {name:?}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Evolution skipped or repeated a version.
    #[error("version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    /// Evolution targets another darc lineage.
    #[error("base id mismatch: expected {expected:?}, got {actual:?}")]
    BaseIdMismatch { expected: DarcId, actual: DarcId },

    /// Caller credentials do not satisfy the rule.
    #[error("authorization denied for action {action:?}")]
    AuthorizationDenied { action: String },

    /// Unknown invoke command.
    #[error("invalid command: {0}")]
    UnsupportedCommand(String),

    /// Instruction shape not accepted by the contract.
    #[error("{contract} can only be {allowed}")]
    UnsupportedOperation {
        contract: &'static str,
        allowed: &'static str,
    },

    /// Reserved command without semantics yet.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// No handler for the contract kind.
    #[error("unknown contract kind: {0}")]
    UnknownContract(String),

    /// The store view failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ContractError {
    /// Malformed value read from `key`.
    pub fn malformed_at(key: &ObjectId, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            context: format!("record at {key:?}"),
            reason: reason.to_string(),
        }
    }

    /// Malformed instruction argument.
    pub fn malformed_arg(name: &str, reason: impl ToString) -> Self {
        Self::MalformedRecord {
            context: format!("argument {name:?}"),
            reason: reason.to_string(),
        }
    }

    /// Invalid instruction argument.
    pub fn invalid_arg(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<DarcError> for ContractError {
    fn from(err: DarcError) -> Self {
        match err {
            DarcError::Encoding(reason) => Self::MalformedRecord {
                context: "darc".to_string(),
                reason,
            },
            DarcError::EmptyRules => Self::EmptyPolicy,
            DarcError::BaseIdMismatch { expected, actual } => {
                Self::BaseIdMismatch { expected, actual }
            }
            DarcError::VersionMismatch { expected, actual } => {
                Self::VersionMismatch { expected, actual }
            }
            DarcError::Unauthorized { action } => Self::AuthorizationDenied { action },
            other @ (DarcError::InvalidExpression { .. }
            | DarcError::InvalidIdentity(_)
            | DarcError::InvalidSignature { .. }
            | DarcError::Structure(_)) => Self::PolicyVerificationFailed(other.to_string()),
        }
    }
}

// =============================================================================
// STORE ERRORS
// =============================================================================

/// Errors from a collection view or from applying state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Create at a key that already holds a record.
    #[error("object already exists: {key:?}")]
    AlreadyExists { key: ObjectId },

    /// Update or remove of a key without a record.
    #[error("object does not exist: {key:?}")]
    Missing { key: ObjectId },

    /// Backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

// =============================================================================
// EXECUTION ERRORS
// =============================================================================

/// Errors that reject a whole batch before any instruction runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Too many instructions in one batch.
    #[error("batch too large: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// Engine configuration is unusable.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// TESTS
// =============================================================================
