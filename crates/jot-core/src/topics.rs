//! Canonical topic table: lowercase keyword → parent title.
//!
//! Lookup walks entries in insertion order and the first keyword contained in
//! the topic wins, so ordering is significant. The table also memoises the
//! record id of a canonical title once it has been looked up or created; ids
//! are never written to disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTopic {
    /// Always lowercase.
    pub keyword: String,
    pub title: String,
    #[serde(skip)]
    pub record_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTopics {
    entries: Vec<CanonicalTopic>,
}

impl CanonicalTopics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from `(keyword, title)` pairs, keeping their order.
    pub fn from_pairs<K, T>(pairs: impl IntoIterator<Item = (K, T)>) -> Self
    where
        K: AsRef<str>,
        T: Into<String>,
    {
        let mut topics = Self::new();
        for (keyword, title) in pairs {
            topics.insert(keyword.as_ref(), title);
        }
        topics
    }

    /// Map `keyword` (lowercased) to `title`.
    ///
    /// An existing keyword keeps its position and gets the new title. Blank
    /// keywords are ignored since they would match every topic.
    pub fn insert(&mut self, keyword: &str, title: impl Into<String>) {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return;
        }
        let title = title.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.keyword == keyword) {
            if entry.title != title {
                entry.title = title;
                entry.record_id = None;
            }
            return;
        }
        self.entries.push(CanonicalTopic {
            keyword,
            title,
            record_id: None,
        });
    }

    /// First entry whose keyword occurs in `topic`, ignoring case.
    #[must_use]
    pub fn find_match(&self, topic: &str) -> Option<&CanonicalTopic> {
        let topic = topic.to_lowercase();
        self.entries
            .iter()
            .find(|entry| topic.contains(entry.keyword.as_str()))
    }

    /// Remember the record id of every entry titled `title`.
    pub fn remember_id(&mut self, title: &str, id: &RecordId) {
        for entry in self.entries.iter_mut().filter(|e| e.title == title) {
            entry.record_id = Some(id.clone());
        }
    }

    /// Add entries from `other` whose keywords are not yet present.
    pub fn merge(&mut self, other: Self) {
        for entry in other.entries {
            if !self.entries.iter().any(|e| e.keyword == entry.keyword) {
                self.entries.push(entry);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalTopic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a table saved by [`save`](Self::save). A missing file is an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] if the file cannot be read or is not a JSON array
    /// of `{keyword, title}` objects.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(CoreError::TopicsFile {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let entries: Vec<CanonicalTopic> =
            serde_json::from_str(&text).map_err(|source| CoreError::TopicsFormat {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_pairs(
            entries.into_iter().map(|e| (e.keyword, e.title)),
        ))
    }

    /// Write the table as a pretty JSON array, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TopicsFile`] on any I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let io_err = |source| CoreError::TopicsFile {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            CoreError::TopicsFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn match_is_case_insensitive_substring() {
        let topics = CanonicalTopics::from_pairs([("Notion", "Notion Integration Project")]);
        let hit = topics.find_match("notion bugfix").unwrap();
        assert_eq!(hit.keyword, "notion");
        assert_eq!(hit.title, "Notion Integration Project");
        assert!(topics.find_match("NOTION automation script").is_some());
        assert!(topics.find_match("parser work").is_none());
    }

    #[test]
    fn first_keyword_in_order_wins() {
        let topics = CanonicalTopics::from_pairs([
            ("api", "API Platform"),
            ("notion", "Notion Integration Project"),
        ]);
        let hit = topics.find_match("notion api sync").unwrap();
        assert_eq!(hit.title, "API Platform");
    }

    #[test]
    fn reinserting_keyword_keeps_position() {
        let mut topics = CanonicalTopics::from_pairs([("a", "A"), ("b", "B")]);
        topics.insert("A", "Alpha");
        let titles: Vec<&str> = topics.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "B"]);
    }

    #[test]
    fn blank_keyword_is_ignored() {
        let mut topics = CanonicalTopics::new();
        topics.insert("  ", "Everything");
        assert!(topics.is_empty());
    }

    #[test]
    fn remembered_id_is_cleared_when_title_changes() {
        let mut topics = CanonicalTopics::from_pairs([("notion", "Notion")]);
        topics.remember_id("Notion", &RecordId::new("p-1"));
        assert_eq!(
            topics.find_match("notion").unwrap().record_id,
            Some(RecordId::new("p-1"))
        );

        topics.insert("notion", "Notion Integration Project");
        assert!(topics.find_match("notion").unwrap().record_id.is_none());
    }

    #[test]
    fn merge_keeps_existing_keywords_first() {
        let mut topics = CanonicalTopics::from_pairs([("notion", "Configured")]);
        topics.merge(CanonicalTopics::from_pairs([
            ("notion", "Saved"),
            ("parser", "Parser"),
        ]));
        let titles: Vec<&str> = topics.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Configured", "Parser"]);
    }

    #[test]
    fn save_and_load_preserve_order_without_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("topics.json");

        let mut topics = CanonicalTopics::from_pairs([("zeta", "Zeta"), ("alpha", "Alpha")]);
        topics.remember_id("Zeta", &RecordId::new("p-9"));
        topics.save(&path).unwrap();

        let loaded = CanonicalTopics::load(&path).unwrap();
        let keywords: Vec<&str> = loaded.iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["zeta", "alpha"]);
        assert!(loaded.iter().all(|e| e.record_id.is_none()));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let topics = CanonicalTopics::load(&dir.path().join("absent.json")).unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = CanonicalTopics::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::TopicsFormat { .. }));
    }
}
