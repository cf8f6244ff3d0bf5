//! End-to-end logging requests with a scripted extractor and console.

use jot_core::enums::{Category, TaskStatus};
use jot_core::topics::CanonicalTopics;
use jot_ledger::console::ScriptedConsole;
use jot_ledger::memory::MemoryStore;
use jot_ledger::scripted::ScriptedExtractor;
use jot_ledger::session::CLARIFY_PROMPT;
use jot_ledger::{
    AbandonReason, LogOutcome, MarkdownMirror, MirrorStatus, ParentResolver, ResolutionTier,
    Session,
};
use pretty_assertions::assert_eq;

const CLARIFY: &str = r#"{"clarify": "Could you briefly describe the broader project or context this task is part of?"}"#;

const NOTION_TASK: &str = r#"```json
{
  "task": "Notion automation script",
  "status": "In progress",
  "description": "Wrote the first version of the sync script.",
  "tools": "Python, Notion API, ",
  "goal": "Automate daily logs",
  "log_type": "Task log",
  "category": "Work",
  "parent_topic": "Notion automation"
}
```"#;

type TestSession = Session<ScriptedExtractor, MemoryStore, ScriptedConsole>;

fn session(replies: &[&str], answers: &[&str], log_dir: &std::path::Path) -> TestSession {
    Session::new(
        ScriptedExtractor::new(replies.iter().copied()),
        MemoryStore::new(),
        ScriptedConsole::new(answers.iter().copied()),
        ParentResolver::new(CanonicalTopics::from_pairs([(
            "notion",
            "Notion Integration Project",
        )])),
        MarkdownMirror::new(log_dir),
    )
}

#[tokio::test]
async fn three_clarifications_abandon_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(
        &[CLARIFY, CLARIFY, CLARIFY],
        &["some project", "the same project"],
        dir.path(),
    );

    let outcome = session.log("fixed a few things").await.unwrap();

    assert_eq!(
        outcome,
        LogOutcome::Abandoned(AbandonReason::ClarificationExhausted { rounds: 3 })
    );
    assert_eq!(session.extractor().inputs().len(), 3);
    assert_eq!(session.console().prompts, vec![CLARIFY_PROMPT, CLARIFY_PROMPT]);
    assert!(session.console().printed("Too many clarification attempts"));
    assert!(session.store().records().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn valid_reply_writes_one_record_and_one_block() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(&[NOTION_TASK], &[], dir.path());

    let outcome = session
        .log("Started a Python script that syncs my logs to Notion")
        .await
        .unwrap();
    let LogOutcome::Logged(logged) = outcome else {
        panic!("expected a logged task, got {outcome:?}");
    };

    // Parent resolved through the canonical keyword, task linked to it.
    assert!(matches!(
        logged.parent.tier,
        ResolutionTier::Canonical { created: true, .. }
    ));
    let records = session.store().records();
    assert_eq!(records.len(), 2);
    let (task_id, task) = &records[1];
    assert_eq!(task_id, &logged.report.record_id);
    assert_eq!(task.title, "Notion automation script");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.description, "Wrote the first version of the sync script.");
    assert_eq!(task.tools, vec!["Python".to_string(), "Notion API".to_string()]);
    assert_eq!(task.goal, "Automate daily logs");
    assert_eq!(task.log_type, "Task log");
    assert_eq!(task.category, Category::Work);
    assert_eq!(task.time, logged.record.created_at);
    assert_eq!(task.parent.as_ref(), Some(&logged.parent.id));

    let MirrorStatus::Saved { path } = &logged.report.mirror else {
        panic!("mirror not saved: {:?}", logged.report.mirror);
    };
    let expected_name = format!("{}.md", logged.record.created_at.format("%Y-%m-%d"));
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected_name);
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.matches("### [").count(), 1);
    assert!(text.contains("- **Task**: Notion automation script\n"));
    assert!(text.contains("- **Tools used**: Python, Notion API\n"));
    assert!(text.ends_with("\n\n"));

    assert!(session.console().printed("Log sent to Notion."));
    assert!(session.console().printed("Log saved locally."));
}

#[tokio::test]
async fn later_task_reuses_canonical_parent() {
    let dir = tempfile::tempdir().unwrap();
    let bugfix = NOTION_TASK
        .replace("Notion automation script", "Fix Notion date bug")
        .replace("Notion automation\"", "notion bugfix\"");
    let mut session = session(&[NOTION_TASK, bugfix.as_str()], &[], dir.path());

    let LogOutcome::Logged(first) = session.log("notion script").await.unwrap() else {
        panic!("first request not logged");
    };
    let LogOutcome::Logged(second) = session.log("notion date bug").await.unwrap() else {
        panic!("second request not logged");
    };

    assert_eq!(first.parent.id, second.parent.id);
    assert_eq!(session.store().create_count(), 3);
}

#[tokio::test]
async fn missing_keys_abandon_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(&[r#"{"task": "Something", "status": "Completed"}"#], &[], dir.path());

    let outcome = session.log("did something").await.unwrap();

    assert_eq!(
        outcome,
        LogOutcome::Abandoned(AbandonReason::MissingFields {
            fields: vec!["description", "tools", "goal", "log_type"],
        })
    );
    assert!(session.console().printed("missing required keys (description, tools, goal, log_type)"));
    assert!(session.store().records().is_empty());
}

#[tokio::test]
async fn non_json_reply_is_unparseable() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(&["{'task': 'python dict'}"], &[], dir.path());

    let outcome = session.log("did something").await.unwrap();

    assert!(matches!(
        outcome,
        LogOutcome::Abandoned(AbandonReason::Unparseable { .. })
    ));
    assert!(session.console().printed("Could not parse the extractor reply"));
    assert_eq!(session.store().create_count(), 0);
}

#[tokio::test]
async fn remote_failure_leaves_no_local_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(
        ScriptedExtractor::new([NOTION_TASK]),
        MemoryStore::failing(),
        ScriptedConsole::default(),
        ParentResolver::new(CanonicalTopics::new()),
        MarkdownMirror::new(dir.path()),
    );

    let err = session.log("notion script").await.unwrap_err();

    assert!(matches!(err, jot_ledger::SessionError::Store(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(!session.console().printed("Log sent to Notion."));
}

#[tokio::test]
async fn mirror_failure_is_reported_after_remote_success() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("logs");
    std::fs::write(&blocker, "occupied").unwrap();
    let mut session = session(&[NOTION_TASK], &[], &blocker);

    let LogOutcome::Logged(logged) = session.log("notion script").await.unwrap() else {
        panic!("expected a logged task");
    };

    assert!(matches!(logged.report.mirror, MirrorStatus::Failed { .. }));
    assert_eq!(session.store().create_count(), 2);
    assert!(session.console().printed("Log sent to Notion."));
    assert!(session.console().printed("Warning: local log was not saved"));
}
