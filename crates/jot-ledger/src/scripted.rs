//! [`Extractor`] that replays canned replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use jot_core::extractor::Extractor;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("no scripted reply left")]
pub struct ScriptExhausted;

/// Returns the given replies in order and records every input text.
#[derive(Debug, Default)]
pub struct ScriptedExtractor {
    replies: Mutex<VecDeque<String>>,
    inputs: Mutex<Vec<String>>,
}

impl ScriptedExtractor {
    pub fn new<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            inputs: Mutex::default(),
        }
    }

    /// Texts passed to [`Extractor::extract`], in call order.
    #[must_use]
    pub fn inputs(&self) -> Vec<String> {
        self.inputs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Extractor for ScriptedExtractor {
    type Error = ScriptExhausted;

    async fn extract(&self, text: &str) -> Result<String, ScriptExhausted> {
        self.inputs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(text.to_string());
        self.replies
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front()
            .ok_or(ScriptExhausted)
    }
}
