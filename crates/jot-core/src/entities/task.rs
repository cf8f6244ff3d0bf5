use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::RecordDraft;
use crate::enums::{Category, TaskStatus};
use crate::ids::RecordId;

/// A structured task log inferred from one free-text entry.
///
/// Lives only between extraction and persistence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskRecord {
    pub title: String,
    pub status: TaskStatus,
    pub description: String,
    pub tools: Vec<String>,
    pub goal: String,
    pub log_type: String,
    pub category: Category,
    pub parent_topic: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl TaskRecord {
    /// Topic used to resolve the parent record: the declared parent topic,
    /// or the title when none was declared.
    #[must_use]
    pub fn topic(&self) -> &str {
        self.parent_topic.as_deref().unwrap_or(&self.title)
    }

    /// Build the remote record payload for this task.
    #[must_use]
    pub fn to_draft(&self, parent: Option<RecordId>) -> RecordDraft {
        RecordDraft {
            title: self.title.clone(),
            status: self.status,
            description: self.description.clone(),
            tools: self.tools.clone(),
            goal: self.goal.clone(),
            log_type: self.log_type.clone(),
            category: self.category,
            time: self.created_at,
            parent,
        }
    }
}

/// Split a comma-separated tool list, trimming each entry.
///
/// Empty entries are dropped; the database rejects blank option names.
#[must_use]
pub fn parse_tools(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tool| !tool.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(parent_topic: Option<&str>) -> TaskRecord {
        TaskRecord {
            title: "Fix parser bug".into(),
            status: TaskStatus::Completed,
            description: "Fixed an off-by-one in the tokenizer.".into(),
            tools: vec!["Rust".into(), "VS Code".into()],
            goal: "Stable parsing".into(),
            log_type: "Task log".into(),
            category: Category::Work,
            parent_topic: parent_topic.map(String::from),
            created_at: DateTime::parse_from_rfc3339("2026-03-14T09:26:53+02:00").unwrap(),
        }
    }

    #[test]
    fn tools_are_split_and_trimmed() {
        assert_eq!(parse_tools("Rust,  VS Code ,git"), vec!["Rust", "VS Code", "git"]);
    }

    #[test]
    fn empty_tool_text_gives_no_tools() {
        assert!(parse_tools("").is_empty());
        assert!(parse_tools(" , ,").is_empty());
    }

    #[test]
    fn topic_falls_back_to_title() {
        assert_eq!(record(None).topic(), "Fix parser bug");
        assert_eq!(record(Some("Parser work")).topic(), "Parser work");
    }

    #[test]
    fn draft_copies_every_field() {
        let task = record(None);
        let draft = task.to_draft(Some(RecordId::new("parent-1")));
        assert_eq!(draft.title, task.title);
        assert_eq!(draft.status, task.status);
        assert_eq!(draft.description, task.description);
        assert_eq!(draft.tools, task.tools);
        assert_eq!(draft.goal, task.goal);
        assert_eq!(draft.log_type, task.log_type);
        assert_eq!(draft.category, task.category);
        assert_eq!(draft.time, task.created_at);
        assert_eq!(draft.parent, Some(RecordId::new("parent-1")));
    }
}
