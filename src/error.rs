//! Error types shared by the rewriting engine and the turtle interpreter.

use thiserror::Error;

/// Errors raised by rewriting, interpretation and configuration.
#[derive(Debug, Error)]
pub enum LsysError {
    /// A rule was asked for the output of a symbol it does not match.
    #[error("the rule '{rule}' cannot be applied to symbol '{symbol}'")]
    RuleMismatch { rule: String, symbol: char },

    /// The instruction string contains a symbol outside `F G + - [ ]`.
    #[error("'{0}' is an invalid turtle action")]
    InvalidTurtleAction(char),

    /// `render` was called without a drawing context.
    #[error("cannot render: no drawing context is set for this turtle")]
    NoRenderTarget,

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The symbios state rejected a module.
    #[error("symbios error: {0}")]
    Symbios(#[from] symbios::core::SymbiosError),

    /// The symbios symbol table could not intern a symbol.
    #[error("cannot intern symbol '{symbol}': {reason}")]
    Intern { symbol: char, reason: String },
}

pub type Result<T> = std::result::Result<T, LsysError>;
