//! # jot-llm
//!
//! OpenAI chat-completions client implementing [`Extractor`].
//!
//! One call per extraction: the log text is wrapped in the task-log prompt
//! and the first choice's message content is returned unparsed. Parsing and
//! validation happen in `jot_core::extraction`.

mod error;
mod http;
pub mod prompt;

pub use error::LlmError;

use jot_config::OpenAiConfig;
use jot_core::extractor::Extractor;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::http::check_response;
use crate::prompt::{CompletionResponse, completion_body};

/// Chat-completions client for one model.
#[derive(Debug, Clone)]
pub struct OpenAiExtractor {
    http: reqwest::Client,
    api_base: String,
    model: String,
    structured_output: bool,
}

impl OpenAiExtractor {
    /// Build an extractor from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key cannot be sent as a header,
    /// or [`LlmError::Http`] if the client fails to build.
    pub fn new(config: &OpenAiConfig) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|e| LlmError::Config(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder()
            .user_agent("jot/0.1")
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            structured_output: config.structured_output,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, text: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = completion_body(&self.model, text, self.structured_output);
        let resp = check_response(self.http.post(&url).json(&body).send().await?).await?;
        let completion: CompletionResponse = resp.json().await?;
        let content = completion.into_content().ok_or(LlmError::EmptyResponse)?;
        tracing::debug!(model = %self.model, reply = %content, "completion received");
        Ok(content)
    }
}

impl Extractor for OpenAiExtractor {
    type Error = LlmError;

    async fn extract(&self, text: &str) -> Result<String, LlmError> {
        self.complete(text).await
    }
}
