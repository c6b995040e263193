//! # Rule Expressions
//!
//! Boolean formulas over identities.
//!
//! ```text
//! expr   := term ('|' term)*
//! term   := factor ('&' factor)*
//! factor := identity | '(' expr ')'
//! ```
//!
//! `&` binds tighter than `|`. Whitespace is ignored.

use crate::errors::DarcError;
use crate::identity::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum nesting of parentheses accepted by the parser.
pub const MAX_NESTING: usize = 32;

/// The stored, textual form of an expression.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression(String);

impl Expression {
    /// Wraps expression text without parsing it.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Expression satisfied by a single identity.
    #[must_use]
    pub fn single(identity: &Identity) -> Self {
        Self(identity.to_string())
    }

    /// Expression satisfied when any of `identities` signed.
    #[must_use]
    pub fn any_of(identities: &[Identity]) -> Self {
        Self(join(identities, " | "))
    }

    /// Expression satisfied only when all of `identities` signed.
    #[must_use]
    pub fn all_of(identities: &[Identity]) -> Self {
        Self(join(identities, " & "))
    }

    /// Raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the text into an evaluable tree.
    pub fn parse(&self) -> Result<Expr, DarcError> {
        Parser::new(&self.0).parse()
    }
}

fn join(identities: &[Identity], sep: &str) -> String {
    identities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsed expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Leaf: a single identity.
    Identity(Identity),
    /// All operands must hold.
    And(Vec<Expr>),
    /// At least one operand must hold.
    Or(Vec<Expr>),
}

impl Expr {
    /// Evaluates the tree, deciding leaves with `holds`.
    ///
    /// Evaluation short-circuits from left to right.
    pub fn evaluate<F>(&self, holds: &mut F) -> bool
    where
        F: FnMut(&Identity) -> bool,
    {
        match self {
            Self::Identity(id) => holds(id),
            Self::And(terms) => terms.iter().all(|t| t.evaluate(holds)),
            Self::Or(terms) => terms.iter().any(|t| t.evaluate(holds)),
        }
    }

    /// All identities mentioned in the tree, in order of appearance.
    #[must_use]
    pub fn identities(&self) -> Vec<Identity> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect(&self, out: &mut Vec<Identity>) {
        match self {
            Self::Identity(id) => out.push(*id),
            Self::And(terms) | Self::Or(terms) => terms.iter().for_each(|t| t.collect(out)),
        }
    }
}

// =============================================================================
// PARSER
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    And,
    Or,
    Atom(&'a str),
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> DarcError {
        DarcError::InvalidExpression {
            expression: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn parse(mut self) -> Result<Expr, DarcError> {
        if self.tokens.is_empty() {
            return Err(self.error("empty expression"));
        }
        let expr = self.expr()?;
        if self.pos != self.tokens.len() {
            return Err(self.error(format!("unexpected token at position {}", self.pos)));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn expr(&mut self) -> Result<Expr, DarcError> {
        let mut terms = vec![self.term()?];
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            terms.push(self.term()?);
        }
        Ok(collapse(terms, Expr::Or))
    }

    fn term(&mut self) -> Result<Expr, DarcError> {
        let mut factors = vec![self.factor()?];
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            factors.push(self.factor()?);
        }
        Ok(collapse(factors, Expr::And))
    }

    fn factor(&mut self) -> Result<Expr, DarcError> {
        match self.tokens.get(self.pos) {
            Some(Token::Open) => {
                self.depth += 1;
                if self.depth > MAX_NESTING {
                    return Err(self.error("nesting too deep"));
                }
                self.pos += 1;
                let inner = self.expr()?;
                if self.peek() != Some(&Token::Close) {
                    return Err(self.error("missing ')'"));
                }
                self.pos += 1;
                self.depth -= 1;
                Ok(inner)
            }
            Some(Token::Atom(text)) => {
                let identity = text.parse::<Identity>()?;
                self.pos += 1;
                Ok(Expr::Identity(identity))
            }
            Some(_) => Err(self.error(format!("unexpected operator at position {}", self.pos))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

fn collapse(mut items: Vec<Expr>, wrap: fn(Vec<Expr>) -> Expr) -> Expr {
    if items.len() == 1 {
        items.remove(0)
    } else {
        wrap(items)
    }
}

fn tokenize(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in source.char_indices() {
        let op = match c {
            '(' => Some(Token::Open),
            ')' => Some(Token::Close),
            '&' => Some(Token::And),
            '|' => Some(Token::Or),
            _ => None,
        };
        if op.is_some() || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token::Atom(&source[s..i]));
            }
            if let Some(op) = op {
                tokens.push(op);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token::Atom(&source[s..]));
    }
    tokens
}

// =============================================================================
// TESTS
// =============================================================================
