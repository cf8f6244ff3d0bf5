//! Prompt text and request/response bodies for chat completions.

use jot_core::extraction::reply_schema;
use serde::Deserialize;
use serde_json::{Value, json};

/// Question the model is told to return when the input is too vague.
pub const CLARIFY_QUESTION: &str =
    "Could you briefly describe the broader project or context this task is part of?";

/// System instructions for turning a casual log line into task fields.
#[must_use]
pub fn system_prompt() -> String {
    format!(
        "You are an assistant that converts casual log messages into structured task logs for Notion.\n\
         Return a single JSON object with the following keys, all string values:\n\
         - task: Clear task title\n\
         - status: 'In progress', 'Completed', or 'Pending'\n\
         - description: 1-2 sentence explanation of what was done\n\
         - tools: Comma-separated tools used (or an empty string if none)\n\
         - goal: Short outcome or purpose\n\
         - log_type: Type of log, e.g. 'Task log'\n\
         - category: Must be either 'Work' or 'Personal'\n\
         - parent_topic: A concise and reusable topic this task belongs to (2-4 words)\n\n\
         If the input is vague or unclear (e.g. 'fixed a few things', 'worked on stuff'), DO NOT guess.\n\
         Instead, return exactly this:\n\
         {{\"clarify\": \"{CLARIFY_QUESTION}\"}}\n\n\
         NEVER use vague or generic parent topics like 'Task Management' or 'Improvements'.\n\
         If you are unsure of the context, ask for clarification; do not proceed until confident.\n\
         Respond with the JSON object only. No explanations, no markdown."
    )
}

/// User message wrapping the raw log text.
#[must_use]
pub fn user_message(text: &str) -> String {
    format!("Convert this log into structured JSON: {text}")
}

/// Request body for `POST /chat/completions`.
///
/// With `structured_output` the reply schema is sent as a `json_schema`
/// response format; otherwise plain JSON mode is requested.
#[must_use]
pub fn completion_body(model: &str, text: &str, structured_output: bool) -> Value {
    let response_format = if structured_output {
        json!({
            "type": "json_schema",
            "json_schema": { "name": "task_log", "schema": reply_schema() },
        })
    } else {
        json!({ "type": "json_object" })
    };

    json!({
        "model": model,
        "temperature": 0,
        "messages": [
            { "role": "system", "content": system_prompt() },
            { "role": "user", "content": user_message(text) },
        ],
        "response_format": response_format,
    })
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if any.
    #[must_use]
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}
