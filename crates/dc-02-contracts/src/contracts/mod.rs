//! # Built-in Contracts
//!
//! | Contract | Accepts | Effect |
//! |----------|---------|--------|
//! | `config` | Spawn | Genesis: reference, root darc, chain config |
//! | `darc` | Invoke `evolve` | Replaces a darc with its next version |

pub mod config;
pub mod darc;

pub use config::{genesis_instruction, ConfigContract};
pub use darc::{evolve_instruction, DarcContract};

use crate::domain::Arguments;
use crate::errors::ContractError;
use dc_01_darc::Darc;

/// Argument carrying an encoded darc.
pub const ARG_DARC: &str = "darc";
/// Argument carrying the zig-zag varint block interval in nanoseconds.
pub const ARG_BLOCK_INTERVAL: &str = "block_interval";
/// Darc command that installs the next version.
pub const CMD_EVOLVE: &str = "evolve";
/// Darc command reserved for adding rules.
pub const CMD_ADD: &str = "add";

/// Reads and decodes the `darc` argument, returning it with its raw bytes.
fn darc_argument(args: &Arguments, max_size: usize) -> Result<(Darc, &[u8]), ContractError> {
    let raw = args
        .search(ARG_DARC)
        .ok_or_else(|| ContractError::malformed_arg(ARG_DARC, "argument missing"))?;
    if raw.len() > max_size {
        return Err(ContractError::invalid_arg(
            ARG_DARC,
            format!("{} bytes exceeds limit of {max_size}", raw.len()),
        ));
    }
    let darc = Darc::decode(raw).map_err(|e| ContractError::malformed_arg(ARG_DARC, e))?;
    Ok((darc, raw))
}
