use jot_config::JotConfig;
use serde::Serialize;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct TopicRow<'a> {
    keyword: &'a str,
    title: &'a str,
}

/// Handle `jot topics`.
pub fn handle(config: &JotConfig, flags: GlobalFlags) -> anyhow::Result<()> {
    let topics = bootstrap::canonical_topics(config);
    let rows: Vec<TopicRow<'_>> = topics
        .iter()
        .map(|t| TopicRow {
            keyword: &t.keyword,
            title: &t.title,
        })
        .collect();
    output(&rows, flags)
}
