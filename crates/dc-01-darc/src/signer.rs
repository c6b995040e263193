//! # Ed25519 Signer
//!
//! Key holder used to sign darc versions. Signing is deterministic, so no RNG
//! is needed.

use crate::identity::Identity;
use ed25519_dalek::{Signer as _, SigningKey};

/// An ed25519 key pair able to sign darcs.
pub struct Signer {
    signing_key: SigningKey,
}

impl Signer {
    /// Creates a signer from a 32-byte secret seed.
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Identity matching this key.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::Ed25519(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs `message`, returning the 64-byte signature.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("identity", &self.identity())
            .finish_non_exhaustive()
    }
}
