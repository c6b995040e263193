//! # Driving Ports (API - Inbound)
//!
//! The capability every contract handler provides to the execution engine.

use crate::domain::{Coin, Instruction, StateChange};
use crate::errors::ContractError;
use crate::ports::outbound::CollectionView;
use shared_types::{CONTRACT_CONFIG_ID, CONTRACT_DARC_ID};
use std::fmt;
use std::str::FromStr;

/// State changes plus the outgoing coin side-channel.
pub type ContractOutput = (Vec<StateChange>, Vec<Coin>);

/// Closed set of contract kinds known to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractKind {
    /// Genesis configuration, spawn-only.
    Config,
    /// Darc policy documents, invoke-only.
    Darc,
}

impl ContractKind {
    /// Every kind, in registration order.
    pub const ALL: [ContractKind; 2] = [ContractKind::Config, ContractKind::Darc];

    /// Contract id as stored alongside values.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Config => CONTRACT_CONFIG_ID,
            Self::Darc => CONTRACT_DARC_ID,
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractKind {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ContractError::UnknownContract(s.to_string()))
    }
}

/// A contract handler.
///
/// Handlers read through `view` and describe their writes as state changes.
/// They hold no mutable state, so one instance serves every instruction.
pub trait Contract: Send + Sync {
    /// Kind this handler serves.
    fn kind(&self) -> ContractKind;

    /// Executes `instruction`.
    ///
    /// # Returns
    ///
    /// * `Ok((changes, coins))` - changes to apply and the outgoing coins
    /// * `Err(ContractError)` - the instruction is rejected, nothing applies
    fn execute(
        &self,
        view: &dyn CollectionView,
        instruction: &Instruction,
        coins: Vec<Coin>,
    ) -> Result<ContractOutput, ContractError>;
}
