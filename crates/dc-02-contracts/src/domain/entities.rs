//! # Domain Entities
//!
//! The instruction envelope consumed by contracts, the state-change envelope
//! they produce, the stored record shape and the genesis configuration.

use bincode::Options;
use dc_01_darc::Identity;
use serde::{Deserialize, Serialize};
use shared_types::{DarcId, ObjectId};
use std::fmt;
use std::time::Duration;

use crate::errors::ContractError;

// =============================================================================
// RECORD
// =============================================================================

/// Value stored at a key together with its contract kind and owning darc.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Raw value.
    pub value: Vec<u8>,
    /// Contract kind governing the value.
    pub contract_id: String,
    /// Darc namespace the record belongs to.
    pub darc_id: DarcId,
}

// =============================================================================
// STATE CHANGES
// =============================================================================

/// Kind of mutation proposed by a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateAction {
    /// Insert a new key. Fails at apply time if the key exists.
    Create,
    /// Overwrite an existing key.
    Update,
    /// Delete an existing key.
    Remove,
}

impl fmt::Display for StateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Remove => "remove",
        })
    }
}

/// A proposed mutation of the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// Create, update or remove.
    pub action: StateAction,
    /// Target key.
    pub object_id: ObjectId,
    /// Contract kind recorded with the value.
    pub contract_id: String,
    /// New value; empty for removals.
    pub value: Vec<u8>,
}

impl StateChange {
    /// Creates a state change.
    pub fn new(
        action: StateAction,
        object_id: ObjectId,
        contract_id: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            action,
            object_id,
            contract_id: contract_id.into(),
            value: value.into(),
        }
    }

    /// Record written by this change, or `None` for a removal.
    #[must_use]
    pub fn to_record(&self) -> Option<Record> {
        match self.action {
            StateAction::Remove => None,
            StateAction::Create | StateAction::Update => Some(Record {
                value: self.value.clone(),
                contract_id: self.contract_id.clone(),
                darc_id: self.object_id.darc_id,
            }),
        }
    }
}

// =============================================================================
// COINS
// =============================================================================

/// Opaque coin side-channel passed through contract execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Coin type.
    pub name: [u8; 32],
    /// Amount.
    pub value: u64,
}

// =============================================================================
// INSTRUCTIONS
// =============================================================================

/// Named byte-string argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Name used for lookups.
    pub name: String,
    /// Raw value.
    pub value: Vec<u8>,
}

/// Ordered argument list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments(pub Vec<Argument>);

impl Arguments {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.0.push(Argument {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Value of the first argument called `name`.
    #[must_use]
    pub fn search(&self, name: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| arg.value.as_slice())
    }
}

/// Operation requested by an instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Create a new object governed by `contract_id`.
    Spawn {
        /// Contract kind of the new object.
        contract_id: String,
        /// Contract arguments.
        args: Arguments,
    },
    /// Run `command` on an existing object.
    Invoke {
        /// Command name.
        command: String,
        /// Command arguments.
        args: Arguments,
    },
    /// Delete an existing object.
    Delete,
}

impl InstructionKind {
    /// Short tag used in logs and errors.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Spawn { .. } => "spawn",
            Self::Invoke { .. } => "invoke",
            Self::Delete => "delete",
        }
    }
}

/// A client request addressed to an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Target object.
    pub object_id: ObjectId,
    /// Requested operation.
    pub kind: InstructionKind,
    /// Identities whose signatures were verified upstream.
    pub signers: Vec<Identity>,
}

impl Instruction {
    /// Spawn instruction.
    pub fn spawn(object_id: ObjectId, contract_id: impl Into<String>, args: Arguments) -> Self {
        Self {
            object_id,
            kind: InstructionKind::Spawn {
                contract_id: contract_id.into(),
                args,
            },
            signers: Vec::new(),
        }
    }

    /// Invoke instruction.
    pub fn invoke(object_id: ObjectId, command: impl Into<String>, args: Arguments) -> Self {
        Self {
            object_id,
            kind: InstructionKind::Invoke {
                command: command.into(),
                args,
            },
            signers: Vec::new(),
        }
    }

    /// Delete instruction.
    #[must_use]
    pub fn delete(object_id: ObjectId) -> Self {
        Self {
            object_id,
            kind: InstructionKind::Delete,
            signers: Vec::new(),
        }
    }

    /// Attaches verified signer identities.
    #[must_use]
    pub fn signed_by(mut self, signers: impl IntoIterator<Item = Identity>) -> Self {
        self.signers.extend(signers);
        self
    }
}

// =============================================================================
// CHAIN CONFIG
// =============================================================================

/// Ledger-wide parameters written once at genesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Target time between blocks. Always non-zero.
    pub block_interval: Duration,
}

/// Upper bound on an encoded [`ChainConfig`].
const MAX_ENCODED_CONFIG: u64 = 1024;

fn config_codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_ENCODED_CONFIG)
        .reject_trailing_bytes()
}

impl ChainConfig {
    /// Creates a config; the interval must be non-zero.
    pub fn new(block_interval: Duration) -> Result<Self, ContractError> {
        let config = Self { block_interval };
        config.validate()?;
        Ok(config)
    }

    /// Checks the config invariants.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.block_interval.is_zero() {
            return Err(ContractError::invalid_arg(
                "block_interval",
                "block interval is zero",
            ));
        }
        Ok(())
    }

    /// Encodes the config for storage.
    pub fn encode(&self) -> Result<Vec<u8>, ContractError> {
        config_codec()
            .serialize(self)
            .map_err(|e| ContractError::MalformedRecord {
                context: "config".to_string(),
                reason: e.to_string(),
            })
    }

    /// Decodes a stored config and re-checks its invariants.
    pub fn decode(bytes: &[u8]) -> Result<Self, ContractError> {
        let config: Self =
            config_codec()
                .deserialize(bytes)
                .map_err(|e| ContractError::MalformedRecord {
                    context: "config".to_string(),
                    reason: e.to_string(),
                })?;
        if config.block_interval.is_zero() {
            return Err(ContractError::MalformedRecord {
                context: "config".to_string(),
                reason: "block interval is zero".to_string(),
            });
        }
        Ok(config)
    }
}

// =============================================================================
// TESTS
// =============================================================================
