//! Notion client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Notion API.
#[derive(Debug, Error)]
pub enum NotionError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Notion returned a non-success status.
    #[error("Notion API error ({status} {code}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Notion error code, e.g. `validation_error`, `unauthorized`.
        code: String,
        /// Human-readable message or raw response body.
        message: String,
    },

    /// Notion returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A success response did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}
