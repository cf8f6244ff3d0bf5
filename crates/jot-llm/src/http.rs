//! Status checks for chat-completions responses.

use serde::Deserialize;

use crate::error::LlmError;

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Map 429 to [`LlmError::RateLimited`] and other failures to
/// [`LlmError::Api`], preferring the API's `error.message`.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    if resp.status() == 429 {
        let retry_after_secs = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(LlmError::RateLimited { retry_after_secs });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map_or(body, |envelope| envelope.error.message);
        return Err(LlmError::Api { status, message });
    }
    Ok(resp)
}
