//! The remote database seam.
//!
//! `jot-notion` implements [`RecordStore`] over the Notion REST API;
//! `jot-ledger` ships an in-memory implementation for tests.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::entities::RecordDraft;
use crate::ids::RecordId;

/// Predicate on a record's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleFilter {
    /// Title equals the value exactly.
    Equals(String),
    /// Title contains the value as a substring.
    Contains(String),
}

impl TitleFilter {
    /// Local evaluation of the filter (case-sensitive).
    #[must_use]
    pub fn matches(&self, title: &str) -> bool {
        match self {
            Self::Equals(value) => title == value,
            Self::Contains(value) => title.contains(value.as_str()),
        }
    }
}

/// A record as returned by a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    /// `None` when the record has an empty title.
    pub title: Option<String>,
}

/// Create and query records in the remote database.
pub trait RecordStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create one record and return the identifier assigned by the store.
    fn create_record(
        &self,
        draft: &RecordDraft,
    ) -> impl Future<Output = Result<RecordId, Self::Error>> + Send;

    /// Return every record whose title satisfies `filter`.
    fn query_records(
        &self,
        filter: &TitleFilter,
    ) -> impl Future<Output = Result<Vec<StoredRecord>, Self::Error>> + Send;
}
