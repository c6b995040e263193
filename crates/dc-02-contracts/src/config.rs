//! # Engine Configuration
//!
//! Limits shared by the contract handlers and the execution service.

use crate::errors::ExecutionError;
use dc_01_darc::DEFAULT_DELEGATION_DEPTH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Contract engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum instructions in one batch.
    pub max_batch_size: usize,

    /// Maximum size in bytes of a `darc` argument.
    pub max_darc_size: usize,

    /// Maximum darc-to-darc delegation hops when checking a rule.
    pub max_delegation_depth: usize,

    /// Block interval reported before genesis has been executed.
    pub default_block_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 1000,
            max_darc_size: 64 * 1024,
            max_delegation_depth: DEFAULT_DELEGATION_DEPTH,
            default_block_interval: Duration::from_secs(5),
        }
    }
}

impl EngineConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            max_batch_size: 16,
            max_darc_size: 4096,
            max_delegation_depth: 2,
            default_block_interval: Duration::from_millis(100),
        }
    }

    /// Rejects configurations that would make every instruction fail.
    pub fn validate(&self) -> Result<(), ExecutionError> {
        if self.max_batch_size == 0 {
            return Err(ExecutionError::InvalidConfig(
                "max_batch_size must be positive".to_string(),
            ));
        }
        if self.max_darc_size == 0 {
            return Err(ExecutionError::InvalidConfig(
                "max_darc_size must be positive".to_string(),
            ));
        }
        if self.default_block_interval.is_zero() {
            return Err(ExecutionError::InvalidConfig(
                "default_block_interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
