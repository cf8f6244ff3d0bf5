use jot_config::JotConfig;
use jot_ledger::{Console, MarkdownMirror, Session};
use jot_llm::OpenAiExtractor;
use jot_notion::NotionClient;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogArgs;
use crate::console::StdConsole;
use crate::output::output;

const INPUT_PROMPT: &str = "Log something casually: ";

/// Handle `jot log`.
pub async fn handle(args: &LogArgs, config: &JotConfig, flags: GlobalFlags) -> anyhow::Result<()> {
    let extractor = OpenAiExtractor::new(config.require_openai()?)?;
    let store = NotionClient::new(config.require_notion()?)?;

    let mut console = StdConsole;
    let text = match args.sentence() {
        Some(text) => text,
        None => console.read_line(INPUT_PROMPT)?,
    };

    let mut session = Session::new(
        extractor,
        store,
        console,
        bootstrap::parent_resolver(config),
        MarkdownMirror::new(&config.general.log_dir),
    )
    .with_max_clarifications(config.general.max_clarifications);

    let outcome = session.log(&text).await?;
    output(&outcome, flags)
}
