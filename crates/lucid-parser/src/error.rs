//! Parser error types for lucid-parser.

/// Errors that can occur while sanitizing, wrapping, or parsing C input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("Parse failed at line {line}, column {column}: unexpected {found:?}")]
    ParseFailed {
        /// 1-based line in the unwrapped input.
        line: usize,
        /// 1-based byte column.
        column: usize,
        /// Text of the offending node (empty for a missing token).
        found: String,
    },

    #[error("No function definition found in input")]
    NoFunctions,

    #[error("Function '{0}' is defined more than once")]
    DuplicateFunction(String),

    #[error("Invalid sanitize rule {pattern:?}: {reason}")]
    InvalidRule { pattern: String, reason: String },
}
