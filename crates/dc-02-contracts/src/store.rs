//! # Object Store Adapter
//!
//! Typed reads over a [`CollectionView`]. Every handler goes through these
//! helpers before trusting stored data, so a record's contract kind is always
//! checked against what the caller expects.
//!
//! The config lookup is two-phase on purpose: `GENESIS_REFERENCE_ID` holds the
//! genesis darc id, and only that id locates the config slot.

use crate::domain::ChainConfig;
use crate::errors::ContractError;
use crate::ports::outbound::CollectionView;
use dc_01_darc::Darc;
use shared_types::{DarcId, ObjectId, CONTRACT_CONFIG_ID, CONTRACT_DARC_ID, GENESIS_REFERENCE_ID};
use std::time::Duration;
use tracing::debug;

/// Reads `key`, returning `(value, contract id, owning darc id)`.
pub fn get_value_contract(
    view: &dyn CollectionView,
    key: &ObjectId,
) -> Result<(Vec<u8>, String, DarcId), ContractError> {
    let record = view
        .get(key)?
        .ok_or(ContractError::NotFound { key: *key })?;
    Ok((record.value, record.contract_id, record.darc_id))
}

/// Reads `key` and requires its contract kind to be `expected`.
pub fn get_typed(
    view: &dyn CollectionView,
    key: &ObjectId,
    expected: &str,
) -> Result<Vec<u8>, ContractError> {
    let (value, contract_id, _) = get_value_contract(view, key)?;
    if contract_id != expected {
        debug!(%key, expected, actual = %contract_id, "contract kind mismatch");
        return Err(ContractError::WrongContractKind {
            key: *key,
            expected: expected.to_string(),
            actual: contract_id,
        });
    }
    Ok(value)
}

/// Loads the darc stored at `key`.
pub fn load_darc(view: &dyn CollectionView, key: &ObjectId) -> Result<Darc, ContractError> {
    let value = get_typed(view, key, CONTRACT_DARC_ID)?;
    Darc::decode(&value).map_err(|e| ContractError::malformed_at(key, e))
}

/// Id of the genesis darc, read from `GENESIS_REFERENCE_ID`.
pub fn genesis_darc_id(view: &dyn CollectionView) -> Result<DarcId, ContractError> {
    let value = get_typed(view, &GENESIS_REFERENCE_ID, CONTRACT_CONFIG_ID)?;
    DarcId::from_slice(&value).map_err(|e| ContractError::malformed_at(&GENESIS_REFERENCE_ID, e))
}

/// Loads the genesis darc through the genesis reference.
pub fn load_genesis_darc(view: &dyn CollectionView) -> Result<Darc, ContractError> {
    let genesis = genesis_darc_id(view)?;
    load_darc(view, &ObjectId::darc_slot(genesis))
}

/// Loads the ledger configuration.
pub fn load_config(view: &dyn CollectionView) -> Result<ChainConfig, ContractError> {
    let genesis = genesis_darc_id(view)?;
    let key = ObjectId::config_slot(genesis);
    let value = get_typed(view, &key, CONTRACT_CONFIG_ID)?;
    ChainConfig::decode(&value).map_err(|e| ContractError::malformed_at(&key, e))
}

/// Configured block interval, or `default` before genesis exists.
///
/// Only a missing genesis reference falls back; any other failure is
/// returned.
pub fn load_block_interval(
    view: &dyn CollectionView,
    default: Duration,
) -> Result<Duration, ContractError> {
    match load_config(view) {
        Ok(config) => Ok(config.block_interval),
        Err(ContractError::NotFound { key }) if key == GENESIS_REFERENCE_ID => Ok(default),
        Err(err) => Err(err),
    }
}

// =============================================================================
// TESTS
// =============================================================================
