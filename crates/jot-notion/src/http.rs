//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`NotionError::Api`] with the Notion error body
//! decoded) so request code stays focused on payloads.

use serde::Deserialize;

use crate::error::NotionError;

/// Error body returned by the Notion API.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`NotionError::RateLimited`] with
///   `Retry-After` parsing (falls back to 60 s).
/// - **Non-success status** → [`NotionError::Api`] with Notion's `code` and
///   `message`, or the raw body when it is not a Notion error object.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, NotionError> {
    if resp.status() == 429 {
        return Err(NotionError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) if !err.message.is_empty() => (err.code, err.message),
            _ => (String::new(), body),
        };
        return Err(NotionError::Api {
            status,
            code,
            message,
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", "12")
                .body(String::new())
                .unwrap(),
        );
        assert_eq!(parse_retry_after(&resp), 12);
    }

    #[test]
    fn parse_retry_after_missing_header() {
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            NotionError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn check_response_decodes_notion_error() {
        let body = r#"{"object":"error","status":401,"code":"unauthorized","message":"API token is invalid."}"#;
        let err = check_response(mock_response(401, body)).await.unwrap_err();
        match err {
            NotionError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 401);
                assert_eq!(code, "unauthorized");
                assert_eq!(message, "API token is invalid.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn check_response_keeps_raw_body() {
        let err = check_response(mock_response(502, "Bad Gateway"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NotionError::Api { status: 502, ref message, .. } if message == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }
}
