use anyhow::Context;
use jot_config::JotConfig;
use jot_core::topics::CanonicalTopics;
use jot_ledger::ParentResolver;

pub fn load_config() -> anyhow::Result<JotConfig> {
    JotConfig::load_with_dotenv().context("failed to load jot configuration")
}

/// Canonical table from `[[topics]]`, extended with the saved topics file.
///
/// A topics file that cannot be read is skipped with a warning.
pub fn canonical_topics(config: &JotConfig) -> CanonicalTopics {
    let mut topics = config.canonical_topics();
    if let Some(path) = config.general.topics_path() {
        match CanonicalTopics::load(&path) {
            Ok(saved) => topics.merge(saved),
            Err(error) => tracing::warn!(%error, "ignoring unreadable topics file"),
        }
    }
    topics
}

pub fn parent_resolver(config: &JotConfig) -> ParentResolver {
    let resolver = ParentResolver::new(canonical_topics(config))
        .with_threshold(config.general.similarity_threshold);
    match config.general.topics_path() {
        Some(path) => resolver.with_topics_file(path),
        None => resolver,
    }
}
