//! Cross-cutting error types for jot.
//!
//! Remote-call errors live in their client crates (`NotionError`, `LlmError`).
//! Extractor output problems have their own [`ExtractionError`] because the
//! interaction loop reports and abandons on them instead of propagating.
//!
//! [`ExtractionError`]: crate::extraction::ExtractionError

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be raised by any jot crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (unknown enum value, bad format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The canonical topics file could not be read or written.
    #[error("Topics file {path}: {source}")]
    TopicsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The canonical topics file is not valid JSON.
    #[error("Topics file {path} is malformed: {source}")]
    TopicsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
