use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::enums::{Category, TaskStatus};
use crate::ids::RecordId;

/// Log type given to auto-created grouping records.
pub const PARENT_LOG_TYPE: &str = "Parent";

/// Field values for one record to be created in the remote database.
///
/// Store implementations map each field to their own property kinds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordDraft {
    pub title: String,
    pub status: TaskStatus,
    pub description: String,
    pub tools: Vec<String>,
    pub goal: String,
    pub log_type: String,
    pub category: Category,
    pub time: DateTime<FixedOffset>,
    /// Grouping record this one belongs to.
    pub parent: Option<RecordId>,
}

impl RecordDraft {
    /// Draft for an auto-created parent task titled `title`.
    #[must_use]
    pub fn parent_task(title: &str, time: DateTime<FixedOffset>) -> Self {
        Self {
            title: title.to_string(),
            status: TaskStatus::InProgress,
            description: format!("Auto-created parent task: {title}"),
            tools: Vec::new(),
            goal: "Parent task auto-created for grouping related logs.".to_string(),
            log_type: PARENT_LOG_TYPE.to_string(),
            category: Category::Work,
            time,
            parent: None,
        }
    }
}
