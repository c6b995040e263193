//! # Config Contract
//!
//! Genesis bootstrap. A single Spawn installs the root darc and the chain
//! configuration and records where to find them:
//!
//! | Key | Kind | Value |
//! |-----|------|-------|
//! | `GENESIS_REFERENCE_ID` | `config` | genesis darc id |
//! | `(genesis, ZERO_NONCE)` | `darc` | encoded darc |
//! | `(genesis, ONE_NONCE)` | `config` | encoded [`ChainConfig`] |
//!
//! The handler never reads the store. A second genesis produces the same
//! three Creates, which the apply layer refuses.

use super::{darc_argument, ARG_BLOCK_INTERVAL, ARG_DARC};
use crate::domain::{
    decode_varint_exact, encode_varint, Arguments, ChainConfig, Coin, Instruction,
    InstructionKind, StateAction, StateChange,
};
use crate::errors::ContractError;
use crate::ports::inbound::{Contract, ContractKind, ContractOutput};
use crate::ports::outbound::CollectionView;
use dc_01_darc::{Darc, DarcError};
use shared_types::{ObjectId, CONTRACT_CONFIG_ID, CONTRACT_DARC_ID, GENESIS_REFERENCE_ID};
use std::time::Duration;
use tracing::{debug, info};

/// Handler for the `config` contract.
#[derive(Clone, Debug)]
pub struct ConfigContract {
    max_darc_size: usize,
}

impl ConfigContract {
    /// Creates the handler with the given darc size limit.
    #[must_use]
    pub fn new(max_darc_size: usize) -> Self {
        Self { max_darc_size }
    }

    fn spawn(
        &self,
        target: ObjectId,
        args: &Arguments,
    ) -> Result<Vec<StateChange>, ContractError> {
        let (darc, raw) = darc_argument(args, self.max_darc_size)?;
        darc.verify(true).map_err(|err| match err {
            DarcError::EmptyRules => ContractError::EmptyPolicy,
            other => ContractError::PolicyVerificationFailed(other.to_string()),
        })?;

        let genesis = darc.base_id();
        let expected = ObjectId::darc_slot(genesis);
        if target != expected {
            debug!(%target, %expected, "genesis spawned outside its darc slot");
            return Err(ContractError::invalid_arg(
                "target",
                format!("genesis must be spawned at {expected}"),
            ));
        }

        let block_interval = block_interval_argument(args)?;
        let config = ChainConfig::new(block_interval)?.encode()?;

        info!(genesis = %genesis, ?block_interval, "genesis configuration accepted");
        Ok(vec![
            StateChange::new(
                StateAction::Create,
                GENESIS_REFERENCE_ID,
                CONTRACT_CONFIG_ID,
                genesis.as_bytes().to_vec(),
            ),
            StateChange::new(StateAction::Create, target, CONTRACT_DARC_ID, raw),
            StateChange::new(
                StateAction::Create,
                ObjectId::config_slot(target.darc_id),
                CONTRACT_CONFIG_ID,
                config,
            ),
        ])
    }
}

impl Contract for ConfigContract {
    fn kind(&self) -> ContractKind {
        ContractKind::Config
    }

    fn execute(
        &self,
        _view: &dyn CollectionView,
        instruction: &Instruction,
        coins: Vec<Coin>,
    ) -> Result<ContractOutput, ContractError> {
        match &instruction.kind {
            InstructionKind::Spawn { args, .. } => {
                let changes = self.spawn(instruction.object_id, args)?;
                Ok((changes, coins))
            }
            InstructionKind::Invoke { .. } | InstructionKind::Delete => {
                Err(ContractError::UnsupportedOperation {
                    contract: CONTRACT_CONFIG_ID,
                    allowed: "spawned",
                })
            }
        }
    }
}

fn block_interval_argument(args: &Arguments) -> Result<Duration, ContractError> {
    let raw = args
        .search(ARG_BLOCK_INTERVAL)
        .ok_or_else(|| ContractError::invalid_arg(ARG_BLOCK_INTERVAL, "argument missing"))?;
    let nanos = decode_varint_exact(raw)
        .ok_or_else(|| ContractError::invalid_arg(ARG_BLOCK_INTERVAL, "not a varint"))?;
    match u64::try_from(nanos) {
        Ok(nanos) if nanos > 0 => Ok(Duration::from_nanos(nanos)),
        _ => Err(ContractError::invalid_arg(
            ARG_BLOCK_INTERVAL,
            format!("block interval must be positive, got {nanos}ns"),
        )),
    }
}

/// Builds the genesis Spawn for `darc` with the given block interval.
pub fn genesis_instruction(
    darc: &Darc,
    block_interval: Duration,
) -> Result<Instruction, ContractError> {
    let nanos = i64::try_from(block_interval.as_nanos())
        .map_err(|_| ContractError::invalid_arg(ARG_BLOCK_INTERVAL, "interval too large"))?;
    let args = Arguments::new()
        .with(ARG_DARC, darc.encode()?)
        .with(ARG_BLOCK_INTERVAL, encode_varint(nanos));
    Ok(Instruction::spawn(
        ObjectId::darc_slot(darc.base_id()),
        CONTRACT_CONFIG_ID,
        args,
    ))
}

// =============================================================================
// TESTS
// =============================================================================
