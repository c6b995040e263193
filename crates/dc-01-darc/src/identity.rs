//! # Identities
//!
//! Principals that can appear in rule expressions.
//!
//! | Form | Meaning |
//! |------|---------|
//! | `ed25519:<64 hex>` | Holder of an ed25519 key |
//! | `darc:<64 hex>` | Anyone satisfying the `_sign` rule of that darc |

use crate::errors::DarcError;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use shared_types::DarcId;
use std::fmt;
use std::str::FromStr;

const ED25519_PREFIX: &str = "ed25519";
const DARC_PREFIX: &str = "darc";

/// A principal referenced by rules and carried as caller credentials.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Identity {
    /// An ed25519 public key.
    Ed25519([u8; 32]),
    /// Delegation to another darc.
    Darc(DarcId),
}

impl Identity {
    /// Builds an ed25519 identity, rejecting bytes that are not a curve point.
    pub fn ed25519(public_key: [u8; 32]) -> Result<Self, DarcError> {
        VerifyingKey::from_bytes(&public_key)
            .map_err(|_| DarcError::InvalidIdentity(hex::encode(public_key)))?;
        Ok(Self::Ed25519(public_key))
    }

    /// Verifies `signature` over `message` for this identity.
    ///
    /// Darc identities cannot sign directly and always fail.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), DarcError> {
        let invalid = || DarcError::InvalidSignature {
            signer: self.to_string(),
        };
        let Self::Ed25519(public_key) = self else {
            return Err(invalid());
        };
        let key = VerifyingKey::from_bytes(public_key).map_err(|_| invalid())?;
        let signature = Signature::from_slice(signature).map_err(|_| invalid())?;
        key.verify(message, &signature).map_err(|_| invalid())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519(key) => write!(f, "{ED25519_PREFIX}:{}", hex::encode(key)),
            Self::Darc(id) => write!(f, "{DARC_PREFIX}:{}", id.to_hex()),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Identity {
    type Err = DarcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DarcError::InvalidIdentity(s.to_string());
        let (prefix, body) = s.split_once(':').ok_or_else(invalid)?;
        match prefix {
            ED25519_PREFIX => {
                let bytes = hex::decode(body).map_err(|_| invalid())?;
                let key: [u8; 32] = bytes.as_slice().try_into().map_err(|_| invalid())?;
                Self::ed25519(key).map_err(|_| invalid())
            }
            DARC_PREFIX => body.parse::<DarcId>().map(Self::Darc).map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }
}
