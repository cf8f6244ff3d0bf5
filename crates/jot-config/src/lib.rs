//! # jot-config
//!
//! Layered configuration loading for jot using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JOT_*` prefix, `__` as separator)
//! 2. Conventional credential variables (`NOTION_TOKEN`, `NOTION_DATABASE_ID`,
//!    `OPENAI_API_KEY`, `OPENAI_MODEL`)
//! 3. Project-level `.jot/config.toml`
//! 4. User-level `~/.config/jot/config.toml`
//! 5. Built-in defaults
//!
//! Canonical topics are an ordered array of tables:
//!
//! ```toml
//! [[topics]]
//! keyword = "notion"
//! title = "Notion Integration Project"
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use jot_config::JotConfig;
//!
//! let config = JotConfig::load_with_dotenv().expect("config");
//! if config.notion.is_configured() {
//!     println!("database: {}", config.notion.database_id);
//! }
//! ```

mod error;
mod general;
mod notion;
mod openai;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use notion::NotionConfig;
pub use openai::OpenAiConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use jot_core::topics::CanonicalTopics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One configured keyword → parent title mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopicEntry {
    pub keyword: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JotConfig {
    #[serde(default)]
    pub notion: NotionConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
}

impl JotConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is out
    /// of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".jot/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Conventional credential variables
        figment = figment.merge(Self::conventional_env());

        // Layer 4: Prefixed environment variables (highest priority)
        figment.merge(Env::prefixed("JOT_").split("__"))
    }

    /// Reject values the resolver and loop cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a threshold outside 0-100 or
    /// an empty log directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.general.similarity_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "general.similarity_threshold",
                reason: format!("{threshold} is outside 0-100"),
            });
        }
        if self.general.log_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.log_dir",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Fail unless the Notion token and database id are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the first missing value.
    pub fn require_notion(&self) -> Result<&NotionConfig, ConfigError> {
        if self.notion.token.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "notion",
                missing: "NOTION_TOKEN",
            });
        }
        if self.notion.database_id.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "notion",
                missing: "NOTION_DATABASE_ID",
            });
        }
        Ok(&self.notion)
    }

    /// Fail unless the OpenAI API key is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the key is missing.
    pub fn require_openai(&self) -> Result<&OpenAiConfig, ConfigError> {
        if self.openai.is_configured() {
            Ok(&self.openai)
        } else {
            Err(ConfigError::NotConfigured {
                section: "openai",
                missing: "OPENAI_API_KEY",
            })
        }
    }

    /// Canonical topic table seeded from `[[topics]]`, in file order.
    #[must_use]
    pub fn canonical_topics(&self) -> CanonicalTopics {
        CanonicalTopics::from_pairs(
            self.topics
                .iter()
                .map(|t| (t.keyword.as_str(), t.title.clone())),
        )
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jot").join("config.toml"))
    }

    /// Unprefixed variables commonly exported for these services.
    fn conventional_env() -> Env {
        Env::raw().filter_map(|key| {
            let mapped = match key.as_str().to_ascii_lowercase().as_str() {
                "notion_token" => "notion.token",
                "notion_database_id" => "notion.database_id",
                "openai_api_key" => "openai.api_key",
                "openai_model" => "openai.model",
                _ => return None,
            };
            Some(mapped.into())
        })
    }
}
