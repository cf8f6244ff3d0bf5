//! Log writer: one remote record plus a local markdown mirror entry.
//!
//! The remote record is created first. The mirror is only appended after the
//! remote call succeeds, and a mirror failure does not undo the remote record;
//! it is reported in the [`WriteReport`] instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use jot_core::entities::TaskRecord;
use jot_core::ids::RecordId;
use jot_core::store::RecordStore;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to append to {}", path.display())]
pub struct MirrorError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Append-only markdown files named `<dir>/<YYYY-MM-DD>.md`.
///
/// Each entry is written with a single `write_all` on a file opened in append
/// mode. There is no locking across processes.
#[derive(Debug, Clone)]
pub struct MarkdownMirror {
    dir: PathBuf,
}

impl MarkdownMirror {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File for entries created on `date`.
    #[must_use]
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.md", date.format("%Y-%m-%d")))
    }

    /// Append the entry for `record`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError`] if the directory or file cannot be written.
    pub fn append(&self, record: &TaskRecord) -> Result<PathBuf, MirrorError> {
        let path = self.path_for(record.created_at.date_naive());
        let io_err = |source| MirrorError {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;
        file.write_all(render_entry(record).as_bytes())
            .map_err(io_err)?;
        Ok(path)
    }
}

/// Markdown block for one task, ending with a blank line.
#[must_use]
pub fn render_entry(record: &TaskRecord) -> String {
    let mut out = format!(
        "\n### [{stamp}] {category} Log\n\
         - **Task**: {title}\n\
         - **Status**: {status}\n\
         - **What was done**: {description}\n\
         - **Goal**: {goal}\n\
         - **Tools used**: {tools}\n\
         - **Log type**: {log_type}\n\
         - **Category**: {category}\n",
        stamp = record.created_at.format("%Y-%m-%d %H:%M"),
        category = record.category,
        title = record.title,
        status = record.status,
        description = record.description,
        goal = record.goal,
        tools = record.tools.join(", "),
        log_type = record.log_type,
    );
    if let Some(topic) = &record.parent_topic {
        out.push_str("- **Parent topic**: ");
        out.push_str(topic);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Outcome of the local mirror append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MirrorStatus {
    Saved { path: PathBuf },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub record_id: RecordId,
    pub mirror: MirrorStatus,
}

/// Create the remote record for `record`, then append it to the mirror.
///
/// # Errors
///
/// Returns the store's error if the remote create fails; the mirror is not
/// touched in that case.
pub async fn write_log<S: RecordStore>(
    store: &S,
    mirror: &MarkdownMirror,
    record: &TaskRecord,
    parent: Option<RecordId>,
) -> Result<WriteReport, S::Error> {
    let record_id = store.create_record(&record.to_draft(parent)).await?;
    tracing::info!(id = %record_id, title = %record.title, "task record created");

    let mirror = match mirror.append(record) {
        Ok(path) => MirrorStatus::Saved { path },
        Err(e) => {
            tracing::warn!(error = %e, cause = %e.source, "local mirror append failed");
            MirrorStatus::Failed {
                error: format!("{e}: {}", e.source),
            }
        }
    };

    Ok(WriteReport { record_id, mirror })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use jot_core::enums::{Category, TaskStatus};
    use pretty_assertions::assert_eq;

    fn record() -> TaskRecord {
        TaskRecord {
            title: "Notion automation script".into(),
            status: TaskStatus::Completed,
            description: "Wrote the sync script.".into(),
            tools: vec!["Python".into(), "Notion API".into()],
            goal: "Automate logs".into(),
            log_type: "Task log".into(),
            category: Category::Work,
            parent_topic: None,
            created_at: DateTime::parse_from_rfc3339("2026-03-14T09:26:53+01:00").unwrap(),
        }
    }

    #[test]
    fn entry_renders_every_field() {
        assert_eq!(
            render_entry(&record()),
            "\n### [2026-03-14 09:26] Work Log\n\
             - **Task**: Notion automation script\n\
             - **Status**: Completed\n\
             - **What was done**: Wrote the sync script.\n\
             - **Goal**: Automate logs\n\
             - **Tools used**: Python, Notion API\n\
             - **Log type**: Task log\n\
             - **Category**: Work\n\n"
        );
    }

    #[test]
    fn entry_includes_parent_topic_when_declared() {
        let record = TaskRecord {
            parent_topic: Some("Notion automation".into()),
            ..record()
        };
        assert!(render_entry(&record).ends_with("- **Parent topic**: Notion automation\n\n"));
    }

    #[test]
    fn append_creates_directory_and_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = MarkdownMirror::new(dir.path().join("logs"));

        let first = mirror.append(&record()).unwrap();
        let second = mirror.append(&record()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name().unwrap(), "2026-03-14.md");

        let text = std::fs::read_to_string(first).unwrap();
        assert_eq!(text.matches("### [2026-03-14 09:26] Work Log").count(), 2);
    }

    #[test]
    fn append_reports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = MarkdownMirror::new(&blocker).append(&record()).unwrap_err();
        assert!(err.to_string().contains("2026-03-14.md"));
    }
}
