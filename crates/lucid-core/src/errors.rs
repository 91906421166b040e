//! Cross-cutting error types for lucid.
//!
//! Domain-specific errors (`ParserError`, `OracleError`, `ConfigError`) live
//! in their own crates. Everything converges into `anyhow` in `lucid-cli`.

use thiserror::Error;

/// Violations of the rename-map invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A function in the symbol table has no rename entry at all.
    #[error("No renames recorded for function '{function}'")]
    MissingFunction { function: String },

    /// A renameable symbol has no entry in its function's rename map.
    #[error("Rename map for '{function}' has no entry for '{symbol}'")]
    MissingSymbol { function: String, symbol: String },

    /// A rename entry does not correspond to any extracted symbol.
    #[error("Rename map for '{function}' has unknown symbol '{symbol}'")]
    UnknownSymbol { function: String, symbol: String },

    /// Two symbols in one function were given the same final name.
    #[error("Rename map for '{function}' assigns '{name}' more than once")]
    DuplicateName { function: String, name: String },

    /// A final name is not a valid C identifier.
    #[error("Rename map for '{function}' contains invalid identifier '{name}'")]
    InvalidName { function: String, name: String },
}
