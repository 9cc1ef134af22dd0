//! The rewriting engine: an axiom expanded generation by generation.
//!
//! ```text
//! Axiom: A          Rules: A -> AB, B -> A
//!
//! 0: A
//! 1: AB
//! 2: ABA
//! 3: ABAAB
//! 4: ABAABABA
//! ```

use crate::grammar::Grammar;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A deterministic Lindenmayer system.
///
/// Every generation rewrites all symbols of the previous sentence in
/// parallel: replacements produced during a pass are only rewritten on the
/// next pass.
///
/// Deserializing reads only the axiom, grammar and generation count and
/// re-expands the sentence; a serialized `current` is ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "LSystemSeed")]
pub struct LSystem {
    axiom: String,
    current: String,
    generation: usize,
    grammar: Grammar,
}

/// The serialized inputs an [`LSystem`] is rebuilt from.
#[derive(Deserialize)]
struct LSystemSeed {
    axiom: String,
    #[serde(default)]
    grammar: Grammar,
    #[serde(default)]
    generation: usize,
}

impl From<LSystemSeed> for LSystem {
    fn from(seed: LSystemSeed) -> Self {
        let mut system = Self::with_grammar(seed.axiom, seed.grammar);
        system.generate(seed.generation);
        system
    }
}

impl LSystem {
    /// Creates a system from an axiom and `(input, output)` rule pairs.
    pub fn new<I, S>(axiom: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        Self::with_grammar(axiom, rules.into_iter().collect())
    }

    /// Creates a system at generation 0 from an axiom and a prepared [`Grammar`].
    pub fn with_grammar(axiom: impl Into<String>, grammar: Grammar) -> Self {
        let axiom = axiom.into();
        Self {
            current: axiom.clone(),
            axiom,
            generation: 0,
            grammar,
        }
    }

    /// The sentence after [`generation`](Self::generation) expansions.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Number of expansions applied since construction.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The sentence at generation 0.
    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// The rules applied on every generation.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Applies the grammar `iterations` times.
    ///
    /// The sentence grows exponentially with the grammar's branching factor;
    /// bounding `iterations` is up to the caller.
    pub fn generate(&mut self, iterations: usize) -> &mut Self {
        for _ in 0..iterations {
            let mut next = String::with_capacity(self.current.len());
            for symbol in self.current.chars() {
                self.grammar.rewrite_into(symbol, &mut next);
            }
            self.current = next;
            self.generation += 1;
            debug!(
                generation = self.generation,
                len = self.current.len(),
                "lsystem generation expanded"
            );
        }
        self
    }
}
