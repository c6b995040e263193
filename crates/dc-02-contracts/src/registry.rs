//! # Contract Registry
//!
//! Typed dispatch table from [`ContractKind`] to its handler. Built once from
//! the engine configuration and shared read-only afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use dc_02_contracts::{ContractKind, ContractRegistry, EngineConfig};
//!
//! let registry = ContractRegistry::with_builtin_contracts(&EngineConfig::default());
//! assert!(registry.is_registered(ContractKind::Config));
//! assert!(registry.is_registered(ContractKind::Darc));
//! ```

use crate::config::EngineConfig;
use crate::contracts::{ConfigContract, DarcContract};
use crate::domain::{Coin, Instruction, InstructionKind};
use crate::errors::ContractError;
use crate::ports::inbound::{Contract, ContractKind, ContractOutput};
use crate::ports::outbound::CollectionView;
use crate::store::get_value_contract;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Shared handler.
pub type DynContract = Arc<dyn Contract>;

/// Dispatch table for contract handlers.
#[derive(Clone, Default)]
pub struct ContractRegistry {
    contracts: HashMap<ContractKind, DynContract>,
}

impl ContractRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `config` and `darc` contracts.
    #[must_use]
    pub fn with_builtin_contracts(config: &EngineConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ConfigContract::new(config.max_darc_size)));
        registry.register(Arc::new(DarcContract::new(
            config.max_darc_size,
            config.max_delegation_depth,
        )));
        registry
    }

    /// Registers a handler under its own kind, replacing any previous one.
    pub fn register(&mut self, contract: DynContract) {
        let kind = contract.kind();
        if self.contracts.insert(kind, contract).is_some() {
            warn!(%kind, "contract already registered, replacing");
        } else {
            info!(%kind, "contract registered");
        }
    }

    /// Check if a kind has a handler.
    #[must_use]
    pub fn is_registered(&self, kind: ContractKind) -> bool {
        self.contracts.contains_key(&kind)
    }

    /// Handler for `kind`.
    #[must_use]
    pub fn get(&self, kind: ContractKind) -> Option<&DynContract> {
        self.contracts.get(&kind)
    }

    /// Contract kind that must handle `instruction`.
    ///
    /// Spawn names the kind explicitly. Invoke and Delete use the kind
    /// recorded with the target object.
    pub fn resolve_kind(
        &self,
        view: &dyn CollectionView,
        instruction: &Instruction,
    ) -> Result<ContractKind, ContractError> {
        match &instruction.kind {
            InstructionKind::Spawn { contract_id, .. } => contract_id.parse(),
            InstructionKind::Invoke { .. } | InstructionKind::Delete => {
                let (_, contract_id, _) = get_value_contract(view, &instruction.object_id)?;
                contract_id.parse()
            }
        }
    }

    /// Runs exactly one handler for `instruction`.
    pub fn dispatch(
        &self,
        view: &dyn CollectionView,
        instruction: &Instruction,
        coins: Vec<Coin>,
    ) -> Result<ContractOutput, ContractError> {
        let kind = self.resolve_kind(view, instruction)?;
        let contract = self
            .get(kind)
            .ok_or_else(|| ContractError::UnknownContract(kind.to_string()))?;
        debug!(%kind, op = instruction.kind.tag(), key = %instruction.object_id, "dispatching");
        contract.execute(view, instruction, coins)
    }
}

impl std::fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.contracts.keys().collect();
        kinds.sort();
        f.debug_struct("ContractRegistry")
            .field("contracts", &kinds)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
