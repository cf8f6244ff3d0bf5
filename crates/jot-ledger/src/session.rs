//! The interactive logging session.
//!
//! One call to [`Session::log`] handles one request chain: extract, ask for
//! clarification up to a bound, resolve the parent, then write the record.
//! Parse and validation problems abandon the request with a console
//! diagnostic; remote failures are returned as [`SessionError`].

use chrono::Local;
use jot_core::entities::TaskRecord;
use jot_core::extraction::{ExtractedTask, Extraction, ExtractionError, parse_extraction};
use jot_core::extractor::Extractor;
use jot_core::store::RecordStore;
use serde::Serialize;
use thiserror::Error;

use crate::console::Console;
use crate::resolver::{ParentResolver, Resolution};
use crate::writer::{MarkdownMirror, MirrorStatus, WriteReport, write_log};

/// Clarification rounds allowed per request chain.
pub const DEFAULT_MAX_CLARIFICATIONS: u32 = 2;

/// Prompt shown when the extractor asks for more context.
pub const CLARIFY_PROMPT: &str = "Your clarification: ";

#[derive(Debug, Error)]
pub enum SessionError<X, S>
where
    X: std::error::Error + 'static,
    S: std::error::Error + 'static,
{
    #[error("extractor call failed")]
    Extractor(#[source] X),

    #[error("record store call failed")]
    Store(#[source] S),

    #[error("console I/O failed")]
    Console(#[source] std::io::Error),
}

/// Why a request ended without writing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbandonReason {
    EmptyInput,
    ClarificationExhausted { rounds: u32 },
    Unparseable { detail: String },
    MissingFields { fields: Vec<&'static str> },
    InvalidField { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedTask {
    pub record: TaskRecord,
    pub parent: Resolution,
    pub report: WriteReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LogOutcome {
    Logged(Box<LoggedTask>),
    Abandoned(AbandonReason),
}

/// Everything one logging request needs.
pub struct Session<X, S, C> {
    extractor: X,
    store: S,
    console: C,
    resolver: ParentResolver,
    mirror: MarkdownMirror,
    max_clarifications: u32,
}

impl<X, S, C> Session<X, S, C>
where
    X: Extractor,
    S: RecordStore,
    C: Console,
{
    pub const fn new(
        extractor: X,
        store: S,
        console: C,
        resolver: ParentResolver,
        mirror: MarkdownMirror,
    ) -> Self {
        Self {
            extractor,
            store,
            console,
            resolver,
            mirror,
            max_clarifications: DEFAULT_MAX_CLARIFICATIONS,
        }
    }

    #[must_use]
    pub const fn with_max_clarifications(mut self, rounds: u32) -> Self {
        self.max_clarifications = rounds;
        self
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn extractor(&self) -> &X {
        &self.extractor
    }

    pub const fn console(&self) -> &C {
        &self.console
    }

    pub const fn resolver(&self) -> &ParentResolver {
        &self.resolver
    }

    /// Turn `text` into a task record, resolve its parent and write it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the extractor, the store or the console
    /// fails. Unusable extractor replies are not errors; they produce
    /// [`LogOutcome::Abandoned`].
    pub async fn log(
        &mut self,
        text: &str,
    ) -> Result<LogOutcome, SessionError<X::Error, S::Error>> {
        let text = text.trim();
        if text.is_empty() {
            return self.abandon(AbandonReason::EmptyInput).map(LogOutcome::Abandoned);
        }

        let task = match self.extract_with_clarification(text).await? {
            Ok(task) => task,
            Err(reason) => return self.abandon(reason).map(LogOutcome::Abandoned),
        };

        let record = task.into_record(Local::now().fixed_offset());
        let parent = self
            .resolver
            .resolve(&self.store, record.topic())
            .await
            .map_err(SessionError::Store)?;

        let report = write_log(&self.store, &self.mirror, &record, Some(parent.id.clone()))
            .await
            .map_err(SessionError::Store)?;

        self.say("Log sent to Notion.")?;
        match &report.mirror {
            MirrorStatus::Saved { .. } => self.say("Log saved locally.")?,
            MirrorStatus::Failed { error } => {
                self.say(&format!("Warning: local log was not saved ({error})."))?;
            }
        }

        Ok(LogOutcome::Logged(Box::new(LoggedTask {
            record,
            parent,
            report,
        })))
    }

    /// Bounded clarification loop. The outer error is a remote or console
    /// failure; the inner one is a reason to abandon.
    async fn extract_with_clarification(
        &mut self,
        text: &str,
    ) -> Result<Result<ExtractedTask, AbandonReason>, SessionError<X::Error, S::Error>> {
        let mut message = text.to_string();
        let mut rounds = 0;

        loop {
            let reply = self
                .extractor
                .extract(&message)
                .await
                .map_err(SessionError::Extractor)?;
            tracing::debug!(%reply, "extractor reply");

            match parse_extraction(&reply) {
                Ok(Extraction::Task(task)) => return Ok(Ok(task)),
                Ok(Extraction::Clarify(question)) => {
                    rounds += 1;
                    if rounds > self.max_clarifications {
                        return Ok(Err(AbandonReason::ClarificationExhausted { rounds }));
                    }
                    self.say(&format!("Clarification requested: {question}"))?;
                    let answer = self
                        .console
                        .read_line(CLARIFY_PROMPT)
                        .map_err(SessionError::Console)?;
                    message = format!("{message} | Context: {}", answer.trim());
                }
                Err(e) => return Ok(Err(abandon_reason(e))),
            }
        }
    }

    fn abandon(
        &mut self,
        reason: AbandonReason,
    ) -> Result<AbandonReason, SessionError<X::Error, S::Error>> {
        tracing::info!(?reason, "request abandoned");
        self.say(&abandon_message(&reason))?;
        Ok(reason)
    }

    fn say(&mut self, line: &str) -> Result<(), SessionError<X::Error, S::Error>> {
        self.console.write_line(line).map_err(SessionError::Console)
    }
}

fn abandon_reason(error: ExtractionError) -> AbandonReason {
    match error {
        ExtractionError::Parse(detail) => AbandonReason::Unparseable { detail },
        ExtractionError::MissingFields(fields) => AbandonReason::MissingFields { fields },
        ExtractionError::InvalidField { field, value } => {
            AbandonReason::InvalidField { field, value }
        }
    }
}

fn abandon_message(reason: &AbandonReason) -> String {
    match reason {
        AbandonReason::Unparseable { detail } => {
            format!("Could not parse the extractor reply: {detail}. Nothing was logged.")
        }
        AbandonReason::MissingFields { fields } => format!(
            "The extractor reply is missing required keys ({}). Please try rewording your input.",
            fields.join(", ")
        ),
        AbandonReason::InvalidField { field, value } => {
            format!("The extractor reply has an invalid {field} '{value}'. Nothing was logged.")
        }
        AbandonReason::EmptyInput => "Nothing to log.".to_string(),
        AbandonReason::ClarificationExhausted { .. } => {
            "Too many clarification attempts. Nothing was logged.".to_string()
        }
    }
}
