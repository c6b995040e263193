//! # Rules
//!
//! Ordered mapping from action name to [`Expression`]. The map is a
//! `BTreeMap` so the encoded form, and with it the darc id, is deterministic.

use crate::errors::DarcError;
use crate::expression::Expression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Action guarding darc evolution.
pub const EVOLVE: &str = "evolve";

/// Action deciding who may act as this darc when it is used as an identity.
pub const SIGN: &str = "_sign";

/// Action-to-expression map of a darc.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rules(BTreeMap<String, Expression>);

impl Rules {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules where `owner` controls both evolution and delegation.
    #[must_use]
    pub fn owned_by(owner: &Expression) -> Self {
        let mut rules = Self::new();
        rules.0.insert(EVOLVE.to_string(), owner.clone());
        rules.0.insert(SIGN.to_string(), owner.clone());
        rules
    }

    /// Adds a new rule; fails if the action already has one.
    pub fn add(&mut self, action: &str, expression: Expression) -> Result<(), DarcError> {
        if self.0.contains_key(action) {
            return Err(DarcError::Structure(format!(
                "rule for {action:?} already exists"
            )));
        }
        self.0.insert(action.to_string(), expression);
        Ok(())
    }

    /// Replaces an existing rule; fails if the action has none.
    pub fn update(&mut self, action: &str, expression: Expression) -> Result<(), DarcError> {
        match self.0.get_mut(action) {
            Some(slot) => {
                *slot = expression;
                Ok(())
            }
            None => Err(DarcError::Structure(format!("no rule for {action:?}"))),
        }
    }

    /// Removes a rule, returning it.
    pub fn remove(&mut self, action: &str) -> Option<Expression> {
        self.0.remove(action)
    }

    /// Expression for `action`.
    #[must_use]
    pub fn get(&self, action: &str) -> Option<&Expression> {
        self.0.get(action)
    }

    /// Whether `action` has a rule.
    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.0.contains_key(action)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the rule set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates rules in action order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
