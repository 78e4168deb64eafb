//! Home feed and search assembly.
//!
//! # Responsibility
//! - Fetch the catalog once per screen load and derive the feed sections.
//! - Provide the uncapped search listing over the same scorer.
//!
//! # Invariants
//! - `vibed`, `following` and `trending` use independent selection rules;
//!   no blended ranking exists between them.
//! - A failed fetch yields an empty feed with `fetch_error` set, never a
//!   panic or a partially stale feed.

use crate::config::FeedConfig;
use crate::model::item::{CatalogItem, CreatorId};
use crate::model::mood::MoodQuery;
use crate::repo::catalog_repo::{CatalogError, CatalogSource};
use crate::search::relevance::{
    filter_followed, rank_matches, score_items, sort_by_recency, ScoredItem,
};
use log::{info, warn};
use std::collections::BTreeSet;
use std::time::Instant;

/// Home feed sections for one screen load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    /// Query the sections were derived from.
    pub query: MoodQuery,
    /// "Because you vibed with ...": best mood matches.
    pub vibed: Vec<ScoredItem>,
    /// Items from followed creators, catalog order.
    pub following: Vec<CatalogItem>,
    /// Newest items, restricted to mood matches when a query is set.
    pub trending: Vec<ScoredItem>,
    /// User-visible fetch failure, when the catalog could not be loaded.
    pub fetch_error: Option<String>,
}

impl Feed {
    /// Heading for the vibed section, `None` when it has nothing to show.
    pub fn vibed_heading(&self) -> Option<String> {
        if self.vibed.is_empty() {
            return None;
        }
        Some(format!("Because you vibed with {}", self.query.label()))
    }
}

/// Feed use-cases over a catalog source.
pub struct FeedService<C: CatalogSource> {
    source: C,
    config: FeedConfig,
}

impl<C: CatalogSource> FeedService<C> {
    pub fn new(source: C) -> Self {
        Self::with_config(source, FeedConfig::default())
    }

    pub fn with_config(source: C, config: FeedConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Fetches the catalog and builds all feed sections.
    pub fn load_feed(&self, query: &MoodQuery, followed: &BTreeSet<CreatorId>) -> Feed {
        let started_at = Instant::now();
        let items = match self.source.fetch_catalog() {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=feed_load module=feed status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Feed {
                    query: query.clone(),
                    fetch_error: Some(err.to_string()),
                    ..Feed::default()
                };
            }
        };

        let feed = build_feed(&self.config, query, followed, items);
        info!(
            "event=feed_load module=feed status=ok duration_ms={} tokens={} vibed={} following={} trending={}",
            started_at.elapsed().as_millis(),
            query.len(),
            feed.vibed.len(),
            feed.following.len(),
            feed.trending.len()
        );
        feed
    }

    /// Fetches the catalog and returns every match, best first.
    ///
    /// An empty query returns no results.
    pub fn search(&self, query: &MoodQuery) -> Result<Vec<ScoredItem>, CatalogError> {
        let items = self.source.fetch_catalog().inspect_err(|err| {
            warn!("event=search module=feed status=error error={err}");
        })?;
        Ok(rank_matches(query, items, None))
    }
}

/// Derives feed sections from an already fetched catalog.
pub fn build_feed(
    config: &FeedConfig,
    query: &MoodQuery,
    followed: &BTreeSet<CreatorId>,
    items: Vec<CatalogItem>,
) -> Feed {
    let vibed = rank_matches(query, items.iter().cloned(), Some(config.vibed_limit));

    let mut following = filter_followed(items.iter().cloned(), followed);
    following.truncate(config.following_limit);

    let trending = trending(config, query, items);

    Feed {
        query: query.clone(),
        vibed,
        following,
        trending,
        fetch_error: None,
    }
}

fn trending(config: &FeedConfig, query: &MoodQuery, mut items: Vec<CatalogItem>) -> Vec<ScoredItem> {
    sort_by_recency(&mut items);
    score_items(query, items)
        .into_iter()
        .filter(|scored| query.is_empty() || scored.score > 0)
        .take(config.trending_limit)
        .collect()
}
