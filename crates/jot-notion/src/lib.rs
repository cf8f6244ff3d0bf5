//! # jot-notion
//!
//! Notion REST client for the task-log database.
//!
//! Implements [`RecordStore`] with two endpoints:
//! - `POST /pages` to create a task or parent record
//! - `POST /databases/{id}/query` with a title filter, following pagination
//!
//! No retries are attempted; every failure is returned to the caller.

mod error;
mod http;
pub mod payload;

pub use error::NotionError;

use jot_config::NotionConfig;
use jot_core::entities::RecordDraft;
use jot_core::ids::RecordId;
use jot_core::store::{RecordStore, StoredRecord, TitleFilter};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::http::check_response;
use crate::payload::{CreatedPage, QueryResponse, create_page_body, query_body};

/// HTTP client bound to one Notion database.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    api_base: String,
    database_id: String,
}

impl NotionClient {
    /// Build a client from configuration.
    ///
    /// The request timeout comes from `timeout_secs`; `0` leaves requests
    /// without a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NotionError::Parse`] if the token cannot be used as a header
    /// value, or [`NotionError::Http`] if the client fails to build.
    pub fn new(config: &NotionConfig) -> Result<Self, NotionError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| NotionError::Parse(format!("invalid Notion token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "notion-version",
            HeaderValue::from_str(&config.version)
                .map_err(|e| NotionError::Parse(format!("invalid Notion version: {e}")))?,
        );

        let mut builder = reqwest::Client::builder()
            .user_agent("jot/0.1")
            .default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
        })
    }

    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    async fn create_page(&self, draft: &RecordDraft) -> Result<RecordId, NotionError> {
        let url = format!("{}/pages", self.api_base);
        let body = create_page_body(&self.database_id, draft);
        let resp = check_response(self.http.post(&url).json(&body).send().await?).await?;
        let page: CreatedPage = resp.json().await?;
        tracing::debug!(id = %page.id, title = %draft.title, "created Notion page");
        Ok(RecordId::new(page.id))
    }

    async fn query_pages(&self, filter: &TitleFilter) -> Result<Vec<StoredRecord>, NotionError> {
        let url = format!(
            "{}/databases/{}/query",
            self.api_base,
            urlencoding::encode(&self.database_id)
        );

        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let body = query_body(filter, cursor.as_deref());
            let resp = check_response(self.http.post(&url).json(&body).send().await?).await?;
            let page: QueryResponse = resp.json().await?;

            records.extend(page.results.iter().map(|p| StoredRecord {
                id: RecordId::new(p.id.clone()),
                title: p.title(),
            }));

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        tracing::debug!(?filter, count = records.len(), "queried Notion database");
        Ok(records)
    }
}

impl RecordStore for NotionClient {
    type Error = NotionError;

    async fn create_record(&self, draft: &RecordDraft) -> Result<RecordId, NotionError> {
        self.create_page(draft).await
    }

    async fn query_records(&self, filter: &TitleFilter) -> Result<Vec<StoredRecord>, NotionError> {
        self.query_pages(filter).await
    }
}
