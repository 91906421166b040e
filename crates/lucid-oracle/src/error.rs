//! Oracle error types.

use thiserror::Error;

/// Errors that can occur when talking to the naming oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP transport error, including request timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The oracle returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// `error` field of the response body, or the raw body.
        message: String,
    },

    /// The response (or the model's message content) could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}
