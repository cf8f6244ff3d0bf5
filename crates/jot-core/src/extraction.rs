//! Parsing and validation of extractor replies.
//!
//! The model is asked for a JSON object. Its reply is untrusted: it is parsed
//! as JSON into [`RawExtraction`] (every value must be a string or null) and
//! then validated into either a clarification request or an [`ExtractedTask`].

use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{TaskRecord, parse_tools};
use crate::enums::{Category, TaskStatus};

/// Keys that must be present for a reply to describe a task.
pub const REQUIRED_KEYS: [&str; 6] = ["task", "status", "description", "tools", "goal", "log_type"];

/// Reply shape as produced by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawExtraction {
    /// Set instead of the task fields when the input is too vague.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clarify: Option<String>,
    /// Clear task title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// `In progress`, `Completed` or `Pending`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// One or two sentences on what was done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Comma-separated tools, possibly empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    /// Short outcome or purpose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Kind of log, e.g. `Task log`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_type: Option<String>,
    /// `Work` or `Personal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Concise reusable topic (2-4 words) the task belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_topic: Option<String>,
}

/// Validated extractor reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The model needs more context; carries its question.
    Clarify(String),
    Task(ExtractedTask),
}

/// Task fields after validation, before a timestamp is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedTask {
    pub title: String,
    pub status: TaskStatus,
    pub description: String,
    pub tools: Vec<String>,
    pub goal: String,
    pub log_type: String,
    pub category: Category,
    pub parent_topic: Option<String>,
}

impl ExtractedTask {
    #[must_use]
    pub fn into_record(self, created_at: DateTime<FixedOffset>) -> TaskRecord {
        TaskRecord {
            title: self.title,
            status: self.status,
            description: self.description,
            tools: self.tools,
            goal: self.goal,
            log_type: self.log_type,
            category: self.category,
            parent_topic: self.parent_topic,
            created_at,
        }
    }
}

/// Reasons an extractor reply cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// Reply is not a JSON object of string values.
    #[error("could not parse extractor reply: {0}")]
    Parse(String),

    /// Reply lacks required keys.
    #[error("extractor reply is missing required keys: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A key holds a value outside its allowed set.
    #[error("extractor reply has invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

/// Parse and validate a raw extractor reply.
///
/// A reply containing `clarify` is a clarification request regardless of any
/// other keys. Missing `category` defaults to work; a blank `parent_topic` is
/// treated as absent.
///
/// # Errors
///
/// Returns [`ExtractionError`] when the reply is not valid JSON, lacks a
/// required key, or carries an unknown status or category.
pub fn parse_extraction(reply: &str) -> Result<Extraction, ExtractionError> {
    let body = strip_code_fence(reply);
    let raw: RawExtraction =
        serde_json::from_str(body).map_err(|e| ExtractionError::Parse(e.to_string()))?;
    raw.validate()
}

impl RawExtraction {
    /// Validate this reply into an [`Extraction`].
    ///
    /// # Errors
    ///
    /// See [`parse_extraction`].
    pub fn validate(self) -> Result<Extraction, ExtractionError> {
        if let Some(question) = self.clarify {
            return Ok(Extraction::Clarify(question));
        }

        let task = self.task.filter(|t| !t.trim().is_empty());
        let present = [
            task.is_some(),
            self.status.is_some(),
            self.description.is_some(),
            self.tools.is_some(),
            self.goal.is_some(),
            self.log_type.is_some(),
        ];
        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .zip(present)
            .filter(|(_, ok)| !ok)
            .map(|(key, _)| *key)
            .collect();

        let (
            Some(title),
            Some(status),
            Some(description),
            Some(tools),
            Some(goal),
            Some(log_type),
        ) = (
            task,
            self.status,
            self.description,
            self.tools,
            self.goal,
            self.log_type,
        )
        else {
            return Err(ExtractionError::MissingFields(missing));
        };

        let status = status
            .parse::<TaskStatus>()
            .map_err(|_| ExtractionError::InvalidField {
                field: "status",
                value: status.clone(),
            })?;
        let category = match self.category {
            Some(value) => value
                .parse::<Category>()
                .map_err(|_| ExtractionError::InvalidField {
                    field: "category",
                    value: value.clone(),
                })?,
            None => Category::default(),
        };

        Ok(Extraction::Task(ExtractedTask {
            title: title.trim().to_string(),
            status,
            description,
            tools: parse_tools(&tools),
            goal,
            log_type,
            category,
            parent_topic: self
                .parent_topic
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }))
    }
}

/// JSON Schema of the reply, for providers that accept one.
#[must_use]
pub fn reply_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(RawExtraction)).unwrap_or_default()
}

/// Drop a surrounding markdown code fence (```` ```json ... ``` ````) if present.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
