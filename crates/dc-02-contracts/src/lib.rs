//! # DC-02 Contracts - Instruction Execution Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Turns client instructions into the state changes they authorize. Handlers
//! read the ledger through a get-only view and never write to it; the caller
//! applies the returned changes.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Record kind checked on every read | `store.rs` - `get_typed()` |
//! | Genesis emits exactly three Creates | `contracts/config.rs` - `ConfigContract::spawn()` |
//! | Non-zero block interval | `contracts/config.rs`, `domain/entities.rs` - `ChainConfig::validate()` |
//! | Evolution authorized by the previous version | `contracts/darc.rs` - `DarcContract::evolve()` |
//! | One genesis per ledger | `adapters/memory_collection.rs`, `adapters/staged_collection.rs` |
//! | Exactly one handler per instruction | `registry.rs` - `ContractRegistry::dispatch()` |
//!
//! ## Fixed Keys
//!
//! | Key | Contents |
//! |-----|----------|
//! | `(ZERO_DARC, ZERO_NONCE)` | Genesis darc id (`config`) |
//! | `(genesis, ZERO_NONCE)` | Genesis darc (`darc`) |
//! | `(genesis, ONE_NONCE)` | [`ChainConfig`] (`config`) |
//!
//! ## Usage Example
//!
//! ```
//! use dc_01_darc::{Darc, Expression, Rules, Signer};
//! use dc_02_contracts::prelude::*;
//! use std::time::Duration;
//!
//! let alice = Signer::from_seed([1u8; 32]);
//! let genesis = Darc::new(Rules::owned_by(&Expression::single(&alice.identity())), "root");
//!
//! let service = ExecutionService::new(EngineConfig::default()).unwrap();
//! let mut store = InMemoryCollection::new();
//! let batch = vec![
//!     genesis_instruction(&genesis, Duration::from_secs(5)).unwrap(),
//!     evolve_instruction(&genesis.evolve(), [alice.identity()]).unwrap(),
//! ];
//! let outcome = service.execute_batch(&store, &batch, Vec::new()).unwrap();
//! assert!(outcome.all_succeeded());
//!
//! store.apply_all(&outcome.state_changes).unwrap();
//! assert_eq!(load_genesis_darc(&store).unwrap().version, 1);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod config;
pub mod contracts;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod registry;
pub mod service;
pub mod store;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{CollectionResolver, InMemoryCollection, StagedCollection};
    pub use crate::config::EngineConfig;
    pub use crate::contracts::{
        evolve_instruction, genesis_instruction, ConfigContract, DarcContract,
    };
    pub use crate::domain::{
        Argument, Arguments, ChainConfig, Coin, Instruction, InstructionKind, Record,
        StateAction, StateChange,
    };
    pub use crate::errors::{ContractError, ExecutionError, StoreError};
    pub use crate::ports::{CollectionView, Contract, ContractKind, ContractOutput};
    pub use crate::registry::{ContractRegistry, DynContract};
    pub use crate::service::{BatchOutcome, ExecutionService, ExecutionStats, InstructionResult};
    pub use crate::store::{
        get_typed, get_value_contract, load_block_interval, load_config, load_darc,
        load_genesis_darc,
    };
}

pub use prelude::*;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
