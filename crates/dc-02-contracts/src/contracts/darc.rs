//! # Darc Contract
//!
//! Darcs are only ever invoked. `evolve` replaces the darc stored at
//! `(base id, ZERO_NONCE)` with its next version after the previous version's
//! `evolve` rule has approved the caller.

use super::{darc_argument, ARG_DARC, CMD_ADD, CMD_EVOLVE};
use crate::adapters::CollectionResolver;
use crate::domain::{Arguments, Coin, Instruction, InstructionKind, StateAction, StateChange};
use crate::errors::ContractError;
use crate::ports::inbound::{Contract, ContractKind, ContractOutput};
use crate::ports::outbound::CollectionView;
use crate::store::load_darc;
use dc_01_darc::{Darc, Identity};
use shared_types::{ObjectId, CONTRACT_DARC_ID, ZERO_NONCE};
use tracing::{debug, info};

/// Handler for the `darc` contract.
#[derive(Clone, Debug)]
pub struct DarcContract {
    max_darc_size: usize,
    max_delegation_depth: usize,
}

impl DarcContract {
    /// Creates the handler.
    #[must_use]
    pub fn new(max_darc_size: usize, max_delegation_depth: usize) -> Self {
        Self {
            max_darc_size,
            max_delegation_depth,
        }
    }

    fn evolve(
        &self,
        view: &dyn CollectionView,
        target: ObjectId,
        args: &Arguments,
        signers: &[Identity],
    ) -> Result<Vec<StateChange>, ContractError> {
        let (next, raw) = darc_argument(args, self.max_darc_size)?;
        let base = next.base_id();
        if target.instance_id != ZERO_NONCE {
            return Err(ContractError::invalid_arg(
                "target",
                "darcs live at instance ZERO_NONCE",
            ));
        }
        if target.darc_id != base {
            debug!(%target, base = %base, "evolution aimed at another darc");
            return Err(ContractError::BaseIdMismatch {
                expected: target.darc_id,
                actual: base,
            });
        }

        let previous = load_darc(view, &ObjectId::darc_slot(base))?;
        let resolver = CollectionResolver::new(view);
        next.sanity_check(&previous, signers, &resolver, self.max_delegation_depth)?;

        info!(darc = %base, version = next.version, "darc evolved");
        Ok(vec![StateChange::new(
            StateAction::Update,
            target,
            CONTRACT_DARC_ID,
            raw,
        )])
    }
}

impl Contract for DarcContract {
    fn kind(&self) -> ContractKind {
        ContractKind::Darc
    }

    fn execute(
        &self,
        view: &dyn CollectionView,
        instruction: &Instruction,
        coins: Vec<Coin>,
    ) -> Result<ContractOutput, ContractError> {
        let (command, args) = match &instruction.kind {
            InstructionKind::Invoke { command, args } => (command.as_str(), args),
            InstructionKind::Spawn { .. } | InstructionKind::Delete => {
                return Err(ContractError::UnsupportedOperation {
                    contract: CONTRACT_DARC_ID,
                    allowed: "invoked",
                })
            }
        };
        match command {
            CMD_EVOLVE => {
                let changes =
                    self.evolve(view, instruction.object_id, args, &instruction.signers)?;
                Ok((changes, coins))
            }
            CMD_ADD => Err(ContractError::NotImplemented(CMD_ADD.to_string())),
            other => Err(ContractError::UnsupportedCommand(other.to_string())),
        }
    }
}

/// Builds the `evolve` Invoke that installs `next`, signed by `signers`.
pub fn evolve_instruction(
    next: &Darc,
    signers: impl IntoIterator<Item = Identity>,
) -> Result<Instruction, ContractError> {
    let args = Arguments::new().with(ARG_DARC, next.encode()?);
    Ok(
        Instruction::invoke(ObjectId::darc_slot(next.base_id()), CMD_EVOLVE, args)
            .signed_by(signers),
    )
}

// =============================================================================
// TESTS
// =============================================================================
