//! Parent-task resolution.
//!
//! A topic is mapped to a grouping record in three tiers:
//!
//! 1. **Canonical**: the first keyword of the [`CanonicalTopics`] table
//!    contained in the topic (case-insensitive) selects a canonical title. The
//!    record with exactly that title is reused, or created when absent.
//! 2. **Fuzzy**: records whose title contains the topic are scored with
//!    [`similarity`]; the best one at or above the threshold wins.
//! 3. **Created**: a new parent record titled with the topic is created and
//!    the topic is registered as its own canonical keyword.
//!
//! The fuzzy tier only scores candidates returned by the store's `contains`
//! filter, so a close title that does not literally contain the topic is
//! never considered.
//!
//! The resolver assumes a single writer. Two processes resolving the same new
//! topic at once can both miss and create duplicate parents.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Local};
use jot_core::entities::RecordDraft;
use jot_core::ids::RecordId;
use jot_core::store::{RecordStore, TitleFilter};
use jot_core::topics::CanonicalTopics;
use serde::Serialize;

use crate::similarity::similarity;

/// Minimum fuzzy score (0-100) for a candidate to be reused.
pub const DEFAULT_THRESHOLD: f64 = 65.0;

/// Which tier produced a [`Resolution`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionTier {
    /// A canonical keyword matched. `created` is true when the canonical
    /// record did not exist yet.
    Canonical {
        keyword: String,
        title: String,
        created: bool,
    },
    /// An existing record scored at or above the threshold.
    Fuzzy { title: String, score: f64 },
    /// Nothing matched; a new parent record was created.
    Created,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub id: RecordId,
    pub tier: ResolutionTier,
}

/// Resolves topics to parent record ids, owning the canonical table.
#[derive(Debug, Clone)]
pub struct ParentResolver {
    topics: CanonicalTopics,
    threshold: f64,
    topics_file: Option<PathBuf>,
}

impl ParentResolver {
    #[must_use]
    pub const fn new(topics: CanonicalTopics) -> Self {
        Self {
            topics,
            threshold: DEFAULT_THRESHOLD,
            topics_file: None,
        }
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Save the canonical table to `path` after every new registration.
    #[must_use]
    pub fn with_topics_file(mut self, path: PathBuf) -> Self {
        self.topics_file = Some(path);
        self
    }

    #[must_use]
    pub const fn topics(&self) -> &CanonicalTopics {
        &self.topics
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Map `topic` to the id of a parent record, creating one if needed.
    ///
    /// Creates at most one remote record per call. Store failures propagate
    /// unchanged; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the store's error if a query or create call fails.
    pub async fn resolve<S: RecordStore>(
        &mut self,
        store: &S,
        topic: &str,
    ) -> Result<Resolution, S::Error> {
        if let Some(resolution) = self.resolve_canonical(store, topic).await? {
            return Ok(resolution);
        }
        if let Some(resolution) = self.resolve_fuzzy(store, topic).await? {
            return Ok(resolution);
        }
        self.create_topic(store, topic).await
    }

    async fn resolve_canonical<S: RecordStore>(
        &mut self,
        store: &S,
        topic: &str,
    ) -> Result<Option<Resolution>, S::Error> {
        let Some(entry) = self.topics.find_match(topic) else {
            return Ok(None);
        };
        let keyword = entry.keyword.clone();
        let title = entry.title.clone();
        tracing::info!(%keyword, %title, "matched canonical keyword");

        if let Some(id) = entry.record_id.clone() {
            return Ok(Some(Resolution {
                id,
                tier: ResolutionTier::Canonical {
                    keyword,
                    title,
                    created: false,
                },
            }));
        }

        let existing = store
            .query_records(&TitleFilter::Equals(title.clone()))
            .await?
            .into_iter()
            .next();

        let (id, created) = match existing {
            Some(record) => (record.id, false),
            None => {
                tracing::info!(%title, "no existing canonical record, creating one");
                let draft = RecordDraft::parent_task(&title, now());
                (store.create_record(&draft).await?, true)
            }
        };
        self.topics.remember_id(&title, &id);

        Ok(Some(Resolution {
            id,
            tier: ResolutionTier::Canonical {
                keyword,
                title,
                created,
            },
        }))
    }

    async fn resolve_fuzzy<S: RecordStore>(
        &self,
        store: &S,
        topic: &str,
    ) -> Result<Option<Resolution>, S::Error> {
        let candidates = store
            .query_records(&TitleFilter::Contains(topic.to_string()))
            .await?;

        let mut best: Option<(RecordId, String, f64)> = None;
        let mut best_score = 0.0;
        for candidate in candidates {
            let Some(title) = candidate.title else {
                continue;
            };
            let score = similarity(topic, &title);
            tracing::debug!(%title, score, "compared parent candidate");
            if score > best_score && score >= self.threshold {
                best_score = score;
                best = Some((candidate.id, title, score));
            }
        }

        Ok(best.map(|(id, title, score)| {
            tracing::info!(%id, %title, score, "best parent match");
            Resolution {
                id,
                tier: ResolutionTier::Fuzzy { title, score },
            }
        }))
    }

    async fn create_topic<S: RecordStore>(
        &mut self,
        store: &S,
        topic: &str,
    ) -> Result<Resolution, S::Error> {
        tracing::info!(%topic, "no parent match, creating new parent task");
        let id = store
            .create_record(&RecordDraft::parent_task(topic, now()))
            .await?;

        self.topics.insert(topic, topic);
        self.topics.remember_id(topic, &id);
        self.persist_topics();

        Ok(Resolution {
            id,
            tier: ResolutionTier::Created,
        })
    }

    fn persist_topics(&self) {
        let Some(path) = &self.topics_file else {
            return;
        };
        if let Err(e) = self.topics.save(path) {
            tracing::warn!(error = %e, "failed to save canonical topics");
        }
    }
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use pretty_assertions::assert_eq;

    fn notion_topics() -> CanonicalTopics {
        CanonicalTopics::from_pairs([("notion", "Notion Integration Project")])
    }

    #[tokio::test]
    async fn canonical_match_creates_once_then_reuses() {
        let store = MemoryStore::new();
        let mut resolver = ParentResolver::new(notion_topics());

        let first = resolver
            .resolve(&store, "Notion automation script")
            .await
            .unwrap();
        assert_eq!(
            first.tier,
            ResolutionTier::Canonical {
                keyword: "notion".into(),
                title: "Notion Integration Project".into(),
                created: true,
            }
        );

        let second = resolver.resolve(&store, "notion bugfix").await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(store.create_count(), 1);
    }

    #[tokio::test]
    async fn canonical_match_reuses_existing_record() {
        let store = MemoryStore::new();
        let existing = store.seed_parent("Notion Integration Project");
        let mut resolver = ParentResolver::new(notion_topics());

        let resolution = resolver.resolve(&store, "NOTION sync").await.unwrap();
        assert_eq!(resolution.id, existing);
        assert_eq!(store.create_count(), 0);
    }

    #[tokio::test]
    async fn memoised_canonical_id_skips_queries() {
        let store = MemoryStore::new();
        let mut resolver = ParentResolver::new(notion_topics());
        resolver.resolve(&store, "notion one").await.unwrap();
        let queries = store.query_count();

        resolver.resolve(&store, "notion two").await.unwrap();
        assert_eq!(store.query_count(), queries);
    }

    #[tokio::test]
    async fn fuzzy_picks_highest_scoring_candidate() {
        let store = MemoryStore::new();
        store.seed_parent("parser rewrite and cleanup work");
        let close = store.seed_parent("parser rewrite");
        let mut resolver = ParentResolver::new(CanonicalTopics::new());

        let resolution = resolver.resolve(&store, "parser rewrit").await.unwrap();
        assert_eq!(resolution.id, close);
        assert!(matches!(
            resolution.tier,
            ResolutionTier::Fuzzy { ref title, .. } if title == "parser rewrite"
        ));
    }

    #[tokio::test]
    async fn fuzzy_below_threshold_creates_new_parent() {
        let store = MemoryStore::new();
        store.seed_parent("parser rewrite and a long tail of unrelated words");
        let mut resolver = ParentResolver::new(CanonicalTopics::new());

        let resolution = resolver.resolve(&store, "parser").await.unwrap();
        assert_eq!(resolution.tier, ResolutionTier::Created);
        assert_eq!(store.create_count(), 1);
        assert_eq!(
            store.record(&resolution.id).unwrap().title,
            "parser".to_string()
        );
    }

    #[tokio::test]
    async fn custom_threshold_is_honoured() {
        let store = MemoryStore::new();
        let existing = store.seed_parent("fix parser bug");
        let mut resolver = ParentResolver::new(CanonicalTopics::new()).with_threshold(60.0);

        // "parser" vs "fix parser bug" scores exactly 60.
        let resolution = resolver.resolve(&store, "parser").await.unwrap();
        assert_eq!(resolution.id, existing);
    }

    #[tokio::test]
    async fn created_topic_is_registered_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("topics.json");
        let store = MemoryStore::new();
        let mut resolver =
            ParentResolver::new(CanonicalTopics::new()).with_topics_file(path.clone());

        let created = resolver.resolve(&store, "Garden Planning").await.unwrap();
        let hit = resolver.topics().find_match("garden planning").unwrap();
        assert_eq!(hit.title, "Garden Planning");
        assert_eq!(hit.record_id.as_ref(), Some(&created.id));

        let saved = CanonicalTopics::load(&path).unwrap();
        assert_eq!(saved.len(), 1);
    }

    #[tokio::test]
    async fn store_errors_propagate() {
        let store = MemoryStore::failing();
        let mut resolver = ParentResolver::new(CanonicalTopics::new());
        assert!(resolver.resolve(&store, "anything").await.is_err());
    }
}
