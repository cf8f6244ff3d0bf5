//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_log_dir() -> String {
    "logs".to_string()
}

/// Minimum fuzzy score (0-100) for reusing an existing parent task.
const fn default_similarity_threshold() -> f64 {
    65.0
}

const fn default_max_clarifications() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory holding the daily markdown mirror files.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Clarification rounds allowed before a request is abandoned.
    #[serde(default = "default_max_clarifications")]
    pub max_clarifications: u32,

    /// JSON file persisting the canonical topic table. Empty keeps the table
    /// in memory only.
    #[serde(default)]
    pub topics_file: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            similarity_threshold: default_similarity_threshold(),
            max_clarifications: default_max_clarifications(),
            topics_file: String::new(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub fn topics_path(&self) -> Option<PathBuf> {
        (!self.topics_file.is_empty()).then(|| PathBuf::from(&self.topics_file))
    }
}
