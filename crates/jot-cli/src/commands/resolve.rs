use anyhow::bail;
use jot_config::JotConfig;
use jot_notion::NotionClient;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResolveArgs;
use crate::output::output;

/// Handle `jot resolve`.
///
/// Runs parent resolution only, so it may still create a parent task.
pub async fn handle(
    args: &ResolveArgs,
    config: &JotConfig,
    flags: GlobalFlags,
) -> anyhow::Result<()> {
    let topic = args.topic.trim();
    if topic.is_empty() {
        bail!("topic must not be empty");
    }

    let store = NotionClient::new(config.require_notion()?)?;
    let mut resolver = bootstrap::parent_resolver(config);
    let resolution = resolver.resolve(&store, topic).await?;
    output(&resolution, flags)
}
