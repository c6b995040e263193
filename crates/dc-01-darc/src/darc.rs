//! # Darc Document
//!
//! A darc is a versioned policy: a rule set plus the lineage needed to evolve
//! it. Version 0 has no base id and its own id becomes the base id of every
//! later version.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Non-empty rule set | [`Darc::verify`] |
//! | Base id fixed across versions | [`Darc::sanity_check`] |
//! | Version grows by exactly one | [`Darc::sanity_check`] |
//! | Evolution authorized by the *previous* version | [`Darc::sanity_check`] |

use crate::errors::DarcError;
use crate::expression::Expr;
use crate::identity::Identity;
use crate::resolver::{DarcResolver, NoDelegation};
use crate::rules::{Rules, EVOLVE, SIGN};
use crate::signer::Signer;
use bincode::Options;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::DarcId;
use std::collections::HashMap;
use tracing::debug;

/// Upper bound on the encoded size of a darc.
pub const MAX_ENCODED_DARC: u64 = 1024 * 1024;

/// Default bound on darc-to-darc delegation hops during rule evaluation.
pub const DEFAULT_DELEGATION_DEPTH: usize = 8;

/// A signature endorsing one darc version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DarcSignature {
    /// Who signed.
    pub signer: Identity,
    /// Signature over the darc id.
    pub signature: Vec<u8>,
}

/// A versioned access-control policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Darc {
    /// Version, 0 for a freshly created darc.
    pub version: u64,
    /// Free-form description.
    pub description: Vec<u8>,
    /// Id of version 0; `None` on version 0 itself.
    pub base_id: Option<DarcId>,
    /// Action-to-expression rules.
    pub rules: Rules,
    /// Endorsements of this version. Not covered by the id.
    pub signatures: Vec<DarcSignature>,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_ENCODED_DARC)
        .reject_trailing_bytes()
}

impl Darc {
    /// Creates a version-0 darc.
    #[must_use]
    pub fn new(rules: Rules, description: impl Into<Vec<u8>>) -> Self {
        Self {
            version: 0,
            description: description.into(),
            base_id: None,
            rules,
            signatures: Vec::new(),
        }
    }

    /// Content hash of everything except the signatures.
    #[must_use]
    pub fn id(&self) -> DarcId {
        let mut hasher = Sha256::new();
        hasher.update(self.version.to_le_bytes());
        update_bytes(&mut hasher, &self.description);
        match &self.base_id {
            Some(base) => {
                hasher.update([1u8]);
                hasher.update(base.as_bytes());
            }
            None => hasher.update([0u8]),
        }
        hasher.update((self.rules.len() as u64).to_le_bytes());
        for (action, expression) in self.rules.iter() {
            update_bytes(&mut hasher, action.as_bytes());
            update_bytes(&mut hasher, expression.as_str().as_bytes());
        }
        DarcId::new(hasher.finalize().into())
    }

    /// Identity shared by every version of this darc.
    #[must_use]
    pub fn base_id(&self) -> DarcId {
        self.base_id.unwrap_or_else(|| self.id())
    }

    /// Encodes the darc for storage.
    pub fn encode(&self) -> Result<Vec<u8>, DarcError> {
        codec()
            .serialize(self)
            .map_err(|e| DarcError::Encoding(e.to_string()))
    }

    /// Decodes a stored darc.
    pub fn decode(bytes: &[u8]) -> Result<Self, DarcError> {
        codec()
            .deserialize(bytes)
            .map_err(|e| DarcError::Encoding(e.to_string()))
    }

    /// Template for the next version: same rules and description, version
    /// bumped, lineage set, signatures cleared.
    #[must_use]
    pub fn evolve(&self) -> Self {
        Self {
            version: self.version.saturating_add(1),
            description: self.description.clone(),
            base_id: Some(self.base_id()),
            rules: self.rules.clone(),
            signatures: Vec::new(),
        }
    }

    /// Appends a signature by `signer` over this version's id.
    pub fn sign(&mut self, signer: &Signer) {
        let id = self.id();
        self.signatures.push(DarcSignature {
            signer: signer.identity(),
            signature: signer.sign(id.as_bytes()),
        });
    }

    /// Identities that attached a signature.
    #[must_use]
    pub fn signers(&self) -> Vec<Identity> {
        self.signatures.iter().map(|s| s.signer).collect()
    }

    /// Structural and signature check.
    ///
    /// With `self_signed`, the darc must be a version 0 and any attached
    /// signatures must satisfy its own `evolve` rule.
    pub fn verify(&self, self_signed: bool) -> Result<(), DarcError> {
        if self.rules.is_empty() {
            return Err(DarcError::EmptyRules);
        }
        for (_, expression) in self.rules.iter() {
            expression.parse()?;
        }
        match (self.version, &self.base_id) {
            (0, Some(_)) => {
                return Err(DarcError::Structure(
                    "version 0 must not carry a base id".to_string(),
                ))
            }
            (v, None) if v > 0 => {
                return Err(DarcError::Structure(format!(
                    "version {v} is missing its base id"
                )))
            }
            _ => {}
        }
        if self_signed && self.version != 0 {
            return Err(DarcError::Structure(format!(
                "only version 0 can be self-signed, got version {}",
                self.version
            )));
        }

        let id = self.id();
        for sig in &self.signatures {
            sig.signer.verify(id.as_bytes(), &sig.signature)?;
        }

        if self_signed && !self.signatures.is_empty() {
            self.check_rule(EVOLVE, &self.signers(), &NoDelegation, 0)?;
        }
        Ok(())
    }

    /// Checks that `signers` satisfy the rule for `action`.
    ///
    /// A missing rule denies. `darc:` identities are followed through
    /// `resolver` at most `max_depth` hops, using the delegate's `_sign` rule.
    pub fn check_rule(
        &self,
        action: &str,
        signers: &[Identity],
        resolver: &dyn DarcResolver,
        max_depth: usize,
    ) -> Result<(), DarcError> {
        let unauthorized = || DarcError::Unauthorized {
            action: action.to_string(),
        };
        let expr = self.rules.get(action).ok_or_else(unauthorized)?.parse()?;
        let mut delegation = Delegation::new(signers, resolver, self.base_id());
        if delegation.holds(&expr, max_depth) {
            Ok(())
        } else {
            Err(unauthorized())
        }
    }

    /// Validates `self` as the successor of `previous`.
    ///
    /// The `evolve` rule is taken from `previous`, never from `self`.
    pub fn sanity_check(
        &self,
        previous: &Darc,
        signers: &[Identity],
        resolver: &dyn DarcResolver,
        max_depth: usize,
    ) -> Result<(), DarcError> {
        let expected_base = previous.base_id();
        let actual_base = self.base_id();
        if expected_base != actual_base {
            debug!(expected = %expected_base, actual = %actual_base, "darc lineage mismatch");
            return Err(DarcError::BaseIdMismatch {
                expected: expected_base,
                actual: actual_base,
            });
        }

        let expected_version = previous.version.checked_add(1).ok_or_else(|| {
            DarcError::Structure("previous version is at the maximum".to_string())
        })?;
        if self.version != expected_version {
            debug!(expected_version, actual = self.version, "darc version mismatch");
            return Err(DarcError::VersionMismatch {
                expected: expected_version,
                actual: self.version,
            });
        }

        self.verify(false)?;
        previous.check_rule(EVOLVE, signers, resolver, max_depth)
    }
}

fn update_bytes(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Delegation state for one rule check.
///
/// Each delegate is resolved at most once and each `(delegate, remaining
/// depth)` pair is decided at most once.
struct Delegation<'a> {
    signers: &'a [Identity],
    resolver: &'a dyn DarcResolver,
    sign_rules: HashMap<DarcId, Option<Expr>>,
    decided: HashMap<(DarcId, usize), bool>,
}

impl<'a> Delegation<'a> {
    fn new(signers: &'a [Identity], resolver: &'a dyn DarcResolver, origin: DarcId) -> Self {
        // The darc under check never delegates to itself.
        let mut sign_rules = HashMap::new();
        sign_rules.insert(origin, None);
        Self {
            signers,
            resolver,
            sign_rules,
            decided: HashMap::new(),
        }
    }

    /// Only key identities match by membership; `darc:` always goes through
    /// the delegate's `_sign` rule.
    fn holds(&mut self, expr: &Expr, depth: usize) -> bool {
        expr.evaluate(&mut |id: &Identity| match id {
            Identity::Ed25519(_) => self.signers.contains(id),
            Identity::Darc(target) => depth > 0 && self.delegate_holds(*target, depth - 1),
        })
    }

    // Depth strictly decreases on every hop, so a pair is never re-entered
    // while it is being decided and cycles end at depth zero.
    fn delegate_holds(&mut self, target: DarcId, depth: usize) -> bool {
        if let Some(&known) = self.decided.get(&(target, depth)) {
            return known;
        }
        let ok = match self.sign_rule(target) {
            Some(expr) => self.holds(&expr, depth),
            None => false,
        };
        self.decided.insert((target, depth), ok);
        ok
    }

    fn sign_rule(&mut self, target: DarcId) -> Option<Expr> {
        let resolver = self.resolver;
        self.sign_rules
            .entry(target)
            .or_insert_with(|| {
                let delegate = resolver.resolve(&target)?;
                delegate.rules.get(SIGN)?.parse().ok()
            })
            .clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
