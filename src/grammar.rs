//! Ordered rule sets with identity fallback.

use crate::rule::RewriteRule;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// An ordered collection of [`RewriteRule`]s.
///
/// Lookup scans in declaration order, so with duplicate inputs the first
/// rule wins. Symbols without a rule are terminal and rewrite to themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    rules: Vec<RewriteRule>,
}

impl Grammar {
    /// Creates a grammar with no rules; every symbol rewrites to itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Earlier rules keep priority.
    pub fn push(&mut self, rule: RewriteRule) {
        self.rules.push(rule);
    }

    /// Adds a rule (builder pattern).
    pub fn with_rule(mut self, input: char, output: impl Into<String>) -> Self {
        self.push(RewriteRule::new(input, output));
        self
    }

    /// The rules in declaration order.
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true when no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn find(&self, symbol: char) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.matches(symbol))
    }

    /// Returns the replacement for `symbol`, or `symbol` itself when no rule matches.
    pub fn lookup(&self, symbol: char) -> Cow<'_, str> {
        match self.find(symbol) {
            Some(rule) => Cow::Borrowed(rule.output()),
            None => Cow::Owned(symbol.to_string()),
        }
    }

    /// Appends the replacement for `symbol` to `out` without allocating for terminals.
    pub fn rewrite_into(&self, symbol: char, out: &mut String) {
        match self.find(symbol) {
            Some(rule) => out.push_str(rule.output()),
            None => out.push(symbol),
        }
    }
}

impl FromIterator<RewriteRule> for Grammar {
    fn from_iter<I: IntoIterator<Item = RewriteRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for Grammar {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(input, output)| RewriteRule::new(input, output))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symbols_fall_back_to_identity() {
        let grammar = Grammar::new().with_rule('A', "AB");
        assert_eq!(grammar.lookup('A'), "AB");
        assert_eq!(grammar.lookup('B'), "B");
        assert_eq!(grammar.lookup('+'), "+");
    }

    #[test]
    fn first_declared_rule_wins() {
        let grammar = Grammar::new().with_rule('A', "first").with_rule('A', "second");
        assert_eq!(grammar.lookup('A'), "first");
    }

    #[test]
    fn rewrite_into_appends() {
        let grammar: Grammar = [('F', "F+F")].into_iter().collect();
        let mut out = String::from(">");
        grammar.rewrite_into('F', &mut out);
        grammar.rewrite_into('-', &mut out);
        assert_eq!(out, ">F+F-");
    }
}
