//! # Core Identifiers
//!
//! Every object in the ledger lives under an [`ObjectId`]: the id of the darc
//! that governs its namespace plus a 32-byte instance nonce.
//!
//! ## Well-known keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `GENESIS_REFERENCE_ID` | `(ZERO_DARC, ZERO_NONCE)`, holds the genesis darc id |
//! | darc slot | `(darc id, ZERO_NONCE)` |
//! | config slot | `(genesis darc id, ONE_NONCE)` |

use crate::errors::IdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of a darc id and of a nonce.
pub const ID_LEN: usize = 32;

/// Contract kind of the genesis configuration objects.
pub const CONTRACT_CONFIG_ID: &str = "config";

/// Contract kind of darc policy documents.
pub const CONTRACT_DARC_ID: &str = "darc";

macro_rules! fixed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        pub struct $name(pub [u8; ID_LEN]);

        impl $name {
            /// Creates the id from a 32-byte array.
            #[must_use]
            pub const fn new(bytes: [u8; ID_LEN]) -> Self {
                Self(bytes)
            }

            /// Creates the id from a slice, rejecting any other length.
            pub fn from_slice(slice: &[u8]) -> Result<Self, IdError> {
                let bytes: [u8; ID_LEN] =
                    slice.try_into().map_err(|_| IdError::InvalidLength {
                        expected: ID_LEN,
                        actual: slice.len(),
                    })?;
                Ok(Self(bytes))
            }

            /// Returns the underlying bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; ID_LEN] {
                &self.0
            }

            /// Returns true if every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; ID_LEN]
            }

            /// Lowercase hex form.
            #[must_use]
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode(&self.0[..4]))?;
                f.write_str("..")
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bytes = hex::decode(s).map_err(|e| IdError::InvalidHex(e.to_string()))?;
                Self::from_slice(&bytes)
            }
        }

        impl From<[u8; ID_LEN]> for $name {
            fn from(bytes: [u8; ID_LEN]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

fixed_id!(
    /// Identifier of a darc. Stable across evolutions when taken as a base id.
    DarcId
);

fixed_id!(
    /// 32-byte instance nonce distinguishing objects inside a darc namespace.
    Nonce
);

/// The all-zero darc id.
pub const ZERO_DARC: DarcId = DarcId([0u8; ID_LEN]);

/// All-zero nonce: the darc's own slot.
pub const ZERO_NONCE: Nonce = Nonce([0u8; ID_LEN]);

/// Nonce with only the least significant bit set: the namespace config slot.
pub const ONE_NONCE: Nonce = {
    let mut bytes = [0u8; ID_LEN];
    bytes[ID_LEN - 1] = 1;
    Nonce(bytes)
};

/// Fixed key holding the id of the genesis darc.
pub const GENESIS_REFERENCE_ID: ObjectId = ObjectId {
    darc_id: ZERO_DARC,
    instance_id: ZERO_NONCE,
};

/// Composite key of an object in the ledger store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ObjectId {
    /// Darc governing the namespace.
    pub darc_id: DarcId,
    /// Instance inside the namespace.
    pub instance_id: Nonce,
}

impl ObjectId {
    /// Creates an object id.
    #[must_use]
    pub const fn new(darc_id: DarcId, instance_id: Nonce) -> Self {
        Self {
            darc_id,
            instance_id,
        }
    }

    /// Slot of the darc document itself.
    #[must_use]
    pub const fn darc_slot(darc_id: DarcId) -> Self {
        Self::new(darc_id, ZERO_NONCE)
    }

    /// Config slot of a namespace.
    #[must_use]
    pub const fn config_slot(darc_id: DarcId) -> Self {
        Self::new(darc_id, ONE_NONCE)
    }

    /// Store key: `darc_id || instance_id`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 2 * ID_LEN] {
        let mut key = [0u8; 2 * ID_LEN];
        key[..ID_LEN].copy_from_slice(&self.darc_id.0);
        key[ID_LEN..].copy_from_slice(&self.instance_id.0);
        key
    }

    /// Parses a 64-byte store key.
    pub fn from_slice(slice: &[u8]) -> Result<Self, IdError> {
        if slice.len() != 2 * ID_LEN {
            return Err(IdError::InvalidLength {
                expected: 2 * ID_LEN,
                actual: slice.len(),
            });
        }
        Ok(Self {
            darc_id: DarcId::from_slice(&slice[..ID_LEN])?,
            instance_id: Nonce::from_slice(&slice[ID_LEN..])?,
        })
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ObjectId({}/{})",
            self.darc_id.to_hex(),
            self.instance_id.to_hex()
        )
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.darc_id, self.instance_id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
