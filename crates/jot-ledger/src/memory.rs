//! In-memory [`RecordStore`] with call counters.
//!
//! Titles are matched with [`TitleFilter::matches`], which is case-sensitive.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Local;
use jot_core::entities::RecordDraft;
use jot_core::ids::RecordId;
use jot_core::store::{RecordStore, StoredRecord, TitleFilter};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("memory store unavailable")]
pub struct MemoryStoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<(RecordId, RecordDraft)>>,
    queries: AtomicUsize,
    creates: AtomicUsize,
    next_id: AtomicUsize,
    failing: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Insert a parent record without counting it as a create call.
    pub fn seed_parent(&self, title: &str) -> RecordId {
        self.insert(RecordDraft::parent_task(title, Local::now().fixed_offset()))
    }

    /// Number of records created through [`RecordStore::create_record`].
    #[must_use]
    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn record(&self, id: &RecordId) -> Option<RecordDraft> {
        self.lock()
            .iter()
            .find(|(record_id, _)| record_id == id)
            .map(|(_, draft)| draft.clone())
    }

    /// All records in creation order.
    #[must_use]
    pub fn records(&self) -> Vec<(RecordId, RecordDraft)> {
        self.lock().clone()
    }

    fn insert(&self, draft: RecordDraft) -> RecordId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = RecordId::new(format!("page-{n}"));
        self.lock().push((id.clone(), draft));
        id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(RecordId, RecordDraft)>> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RecordStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn create_record(&self, draft: &RecordDraft) -> Result<RecordId, MemoryStoreError> {
        if self.failing {
            return Err(MemoryStoreError);
        }
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(self.insert(draft.clone()))
    }

    async fn query_records(
        &self,
        filter: &TitleFilter,
    ) -> Result<Vec<StoredRecord>, MemoryStoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(MemoryStoreError);
        }
        Ok(self
            .lock()
            .iter()
            .filter(|(_, draft)| filter.matches(&draft.title))
            .map(|(id, draft)| StoredRecord {
                id: id.clone(),
                title: (!draft.title.is_empty()).then(|| draft.title.clone()),
            })
            .collect())
    }
}
