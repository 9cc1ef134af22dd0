//! A single production of an L-System grammar.

use crate::error::{LsysError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maps one input symbol to a replacement string.
///
/// Rules are immutable once built; the [`Grammar`](crate::Grammar) that
/// declares them owns them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    input: char,
    output: String,
}

impl RewriteRule {
    /// Creates the rule `input -> output`.
    pub fn new(input: char, output: impl Into<String>) -> Self {
        Self {
            input,
            output: output.into(),
        }
    }

    /// The symbol this rule rewrites.
    pub fn input(&self) -> char {
        self.input
    }

    /// The replacement string, regardless of any symbol.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns true iff `symbol` is this rule's input.
    pub fn matches(&self, symbol: char) -> bool {
        symbol == self.input
    }

    /// Returns the replacement for `symbol`.
    ///
    /// Fails with [`LsysError::RuleMismatch`] when the rule does not match.
    pub fn apply(&self, symbol: char) -> Result<&str> {
        if !self.matches(symbol) {
            return Err(LsysError::RuleMismatch {
                rule: self.to_string(),
                symbol,
            });
        }
        Ok(&self.output)
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}
