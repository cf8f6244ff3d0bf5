//! Language-model client error types.

use thiserror::Error;

/// Errors from the chat-completions call. Reply content problems are not
/// here; they surface later as `ExtractionError` during parsing.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("OpenAI API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or raw response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Client setup failed (bad key header).
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// The response had no message content.
    #[error("completion returned no content")]
    EmptyResponse,
}
