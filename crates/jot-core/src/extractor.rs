//! The structured extractor seam.

use std::future::Future;

/// Turns free text into the raw structured reply of a language model.
///
/// Implementations only perform the remote call. The reply is untrusted and
/// must go through [`parse_extraction`](crate::extraction::parse_extraction).
pub trait Extractor {
    type Error: std::error::Error + Send + Sync + 'static;

    fn extract(&self, text: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
