//! Mapping between jot records and Notion page properties.
//!
//! The database is expected to have these properties:
//!
//! | property      | kind         |
//! |---------------|--------------|
//! | `Name`        | title        |
//! | `Status`      | select       |
//! | `Time`        | date         |
//! | `Description` | rich text    |
//! | `Tools`       | multi-select |
//! | `Goal`        | rich text    |
//! | `Log Type`    | select       |
//! | `Category`    | select       |
//! | `Parent Task` | relation     |

use std::collections::HashMap;

use chrono::SecondsFormat;
use jot_core::entities::RecordDraft;
use jot_core::store::TitleFilter;
use serde::Deserialize;
use serde_json::{Map, Value, json};

pub mod property {
    pub const NAME: &str = "Name";
    pub const STATUS: &str = "Status";
    pub const TIME: &str = "Time";
    pub const DESCRIPTION: &str = "Description";
    pub const TOOLS: &str = "Tools";
    pub const GOAL: &str = "Goal";
    pub const LOG_TYPE: &str = "Log Type";
    pub const CATEGORY: &str = "Category";
    pub const PARENT_TASK: &str = "Parent Task";
}

/// Notion caps a single rich text `content` at 2000 characters.
const MAX_TEXT_CHARS: usize = 2000;

/// Rich text array for `content`, split into chunks Notion accepts.
fn rich_text(content: &str) -> Value {
    let chars: Vec<char> = content.chars().collect();
    let parts: Vec<Value> = chars
        .chunks(MAX_TEXT_CHARS)
        .map(|chunk| json!({ "text": { "content": chunk.iter().collect::<String>() } }))
        .collect();
    Value::Array(parts)
}

/// Page properties for `draft`.
#[must_use]
pub fn page_properties(draft: &RecordDraft) -> Value {
    let tools: Vec<Value> = draft
        .tools
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    let mut properties = Map::new();
    properties.insert(property::NAME.into(), json!({ "title": rich_text(&draft.title) }));
    properties.insert(
        property::STATUS.into(),
        json!({ "select": { "name": draft.status.option_name() } }),
    );
    properties.insert(
        property::TIME.into(),
        json!({ "date": { "start": draft.time.to_rfc3339_opts(SecondsFormat::Secs, false) } }),
    );
    properties.insert(
        property::DESCRIPTION.into(),
        json!({ "rich_text": rich_text(&draft.description) }),
    );
    properties.insert(property::TOOLS.into(), json!({ "multi_select": tools }));
    properties.insert(property::GOAL.into(), json!({ "rich_text": rich_text(&draft.goal) }));
    properties.insert(
        property::LOG_TYPE.into(),
        json!({ "select": { "name": draft.log_type } }),
    );
    properties.insert(
        property::CATEGORY.into(),
        json!({ "select": { "name": draft.category.option_name() } }),
    );
    if let Some(parent) = &draft.parent {
        properties.insert(
            property::PARENT_TASK.into(),
            json!({ "relation": [{ "id": parent.as_str() }] }),
        );
    }
    Value::Object(properties)
}

/// Request body for `POST /pages`.
#[must_use]
pub fn create_page_body(database_id: &str, draft: &RecordDraft) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": page_properties(draft),
    })
}

/// Request body for one `POST /databases/{id}/query` call.
#[must_use]
pub fn query_body(filter: &TitleFilter, start_cursor: Option<&str>) -> Value {
    let condition = match filter {
        TitleFilter::Equals(value) => json!({ "equals": value }),
        TitleFilter::Contains(value) => json!({ "contains": value }),
    };
    let mut body = json!({
        "filter": { "property": property::NAME, "title": condition },
        "page_size": 100,
    });
    if let Some(cursor) = start_cursor {
        body["start_cursor"] = json!(cursor);
    }
    body
}

// ── Responses ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatedPage {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<PageObject>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageObject {
    pub id: String,
    #[serde(default)]
    properties: HashMap<String, PropertyValue>,
}

/// Only the title part of a property is read; other kinds deserialize to
/// an empty value.
#[derive(Debug, Default, Deserialize)]
struct PropertyValue {
    #[serde(default)]
    title: Option<Vec<RichTextObject>>,
}

#[derive(Debug, Deserialize)]
struct RichTextObject {
    #[serde(default)]
    plain_text: Option<String>,
    #[serde(default)]
    text: Option<TextContent>,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    content: String,
}

impl PageObject {
    /// Concatenated plain text of the `Name` property, `None` when empty.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let fragments = self.properties.get(property::NAME)?.title.as_ref()?;
        let title: String = fragments
            .iter()
            .filter_map(|f| {
                f.plain_text
                    .as_deref()
                    .or_else(|| f.text.as_ref().map(|t| t.content.as_str()))
            })
            .collect();
        (!title.is_empty()).then_some(title)
    }
}
