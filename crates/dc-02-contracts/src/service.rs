//! # Execution Service
//!
//! Runs an ordered batch of instructions against a read view.
//!
//! ## Batch semantics
//!
//! - Instructions execute in order over a [`StagedCollection`], so each one
//!   observes the changes accepted before it.
//! - A failing instruction stages nothing, keeps the coins it was given, and
//!   does not stop the batch.
//! - Changes that conflict with the staged state (a `Create` at an occupied
//!   key, such as a second genesis) fail their instruction.
//! - The base view is never written. Callers apply
//!   [`BatchOutcome::state_changes`] to their store.

use crate::adapters::StagedCollection;
use crate::config::EngineConfig;
use crate::domain::{Coin, Instruction, StateChange};
use crate::errors::{ContractError, ExecutionError};
use crate::ports::inbound::ContractOutput;
use crate::ports::outbound::CollectionView;
use crate::registry::ContractRegistry;
use crate::store::load_block_interval;
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span, instrument, warn};

/// Outcome of one instruction: the changes it staged, or why it failed.
pub type InstructionResult = Result<Vec<StateChange>, ContractError>;

/// Statistics for one batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Instructions executed.
    pub executed: usize,
    /// Instructions whose changes were staged.
    pub succeeded: usize,
    /// Rejected instructions.
    pub failed: usize,
    /// Accepted state changes.
    pub state_changes: usize,
    /// Wall-clock time spent in the batch.
    pub elapsed: Duration,
}

/// Everything a batch produced.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    /// One entry per instruction, in order.
    pub results: Vec<InstructionResult>,
    /// Accepted changes of all successful instructions, in order.
    pub state_changes: Vec<StateChange>,
    /// Coins after the last instruction.
    pub coins: Vec<Coin>,
    /// Batch statistics.
    pub stats: ExecutionStats,
}

impl BatchOutcome {
    /// Whether every instruction succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }
}

/// Contract execution entry point.
#[derive(Clone, Debug)]
pub struct ExecutionService {
    config: EngineConfig,
    registry: ContractRegistry,
}

impl ExecutionService {
    /// Service with the built-in contracts.
    pub fn new(config: EngineConfig) -> Result<Self, ExecutionError> {
        let registry = ContractRegistry::with_builtin_contracts(&config);
        Self::with_registry(config, registry)
    }

    /// Service with a caller-supplied registry.
    pub fn with_registry(
        config: EngineConfig,
        registry: ContractRegistry,
    ) -> Result<Self, ExecutionError> {
        config.validate()?;
        Ok(Self { config, registry })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatch table in use.
    #[must_use]
    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Configured block interval, or the engine default before genesis.
    pub fn block_interval(&self, view: &dyn CollectionView) -> Result<Duration, ContractError> {
        load_block_interval(view, self.config.default_block_interval)
    }

    /// Executes a single instruction without staging its changes.
    #[instrument(
        skip(self, view, instruction, coins),
        fields(key = %instruction.object_id, op = instruction.kind.tag())
    )]
    pub fn execute_instruction(
        &self,
        view: &dyn CollectionView,
        instruction: &Instruction,
        coins: Vec<Coin>,
    ) -> Result<ContractOutput, ContractError> {
        self.registry.dispatch(view, instruction, coins)
    }

    /// Executes `instructions` in order.
    ///
    /// # Errors
    ///
    /// * `BatchTooLarge` - more than `max_batch_size` instructions; nothing runs
    #[instrument(skip_all, fields(size = instructions.len()))]
    pub fn execute_batch(
        &self,
        view: &dyn CollectionView,
        instructions: &[Instruction],
        coins: Vec<Coin>,
    ) -> Result<BatchOutcome, ExecutionError> {
        if instructions.len() > self.config.max_batch_size {
            warn!(max = self.config.max_batch_size, "rejecting oversized batch");
            return Err(ExecutionError::BatchTooLarge {
                size: instructions.len(),
                max: self.config.max_batch_size,
            });
        }

        let start = Instant::now();
        let mut staged = StagedCollection::new(view);
        let mut coins = coins;
        let mut results = Vec::with_capacity(instructions.len());
        let mut stats = ExecutionStats::default();

        for (index, instruction) in instructions.iter().enumerate() {
            let span = info_span!(
                "instruction",
                index,
                key = %instruction.object_id,
                op = instruction.kind.tag()
            );
            let _guard = span.enter();
            stats.executed += 1;

            let result = self
                .registry
                .dispatch(&staged, instruction, coins.clone())
                .and_then(|(changes, out)| {
                    staged.stage_all(&changes)?;
                    Ok((changes, out))
                });

            match result {
                Ok((changes, out)) => {
                    debug!(changes = changes.len(), "instruction accepted");
                    stats.succeeded += 1;
                    stats.state_changes += changes.len();
                    coins = out;
                    results.push(Ok(changes));
                }
                Err(err) => {
                    debug!(error = %err, "instruction rejected");
                    stats.failed += 1;
                    results.push(Err(err));
                }
            }
        }

        stats.elapsed = start.elapsed();
        info!(
            executed = stats.executed,
            succeeded = stats.succeeded,
            failed = stats.failed,
            state_changes = stats.state_changes,
            "batch executed"
        );

        Ok(BatchOutcome {
            results,
            state_changes: staged.into_changes(),
            coins,
            stats,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
