//! Notion database configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "https://api.notion.com/v1".to_string()
}

fn default_version() -> String {
    "2022-06-28".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotionConfig {
    /// Integration token (`secret_...` / `ntn_...`).
    #[serde(default)]
    pub token: String,

    /// Database that receives task logs and parent tasks.
    #[serde(default)]
    pub database_id: String,

    /// REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Value of the `Notion-Version` header.
    #[serde(default = "default_version")]
    pub version: String,

    /// Per-request timeout in seconds. `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base: default_api_base(),
            version: default_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NotionConfig {
    /// Check if the token and database id are both set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.database_id.is_empty()
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
