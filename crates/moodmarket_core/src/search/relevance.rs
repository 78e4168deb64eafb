//! Mood relevance scoring over catalog items.
//!
//! # Responsibility
//! - Score one item against a mood query as a 0-100 match percentage.
//! - Provide the ranking and fallback orderings used by feed and deck views.
//!
//! # Invariants
//! - Scoring is pure: no I/O, no logging, no mutation of inputs.
//! - `score` is always within [0, 100]; empty queries score 0.
//! - Descending score sort is stable for ties (input order preserved).
//! - Percentages round half away from zero, computed in integer arithmetic.

use crate::model::item::{CatalogItem, CreatorId};
use crate::model::mood::{normalize_text, MoodQuery};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Placeholder shown when an item declares no mood tag.
pub const FALLBACK_PRIMARY_MOOD: &str = "vibe";

/// Cards shown in the swipe deck and the "vibed" feed section.
pub const DEFAULT_RANKED_LIMIT: usize = 8;

/// Catalog item annotated with its relevance for the current query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredItem {
    pub item: CatalogItem,
    /// Match percentage in [0, 100].
    pub score: u8,
    /// First declared mood tag, or [`FALLBACK_PRIMARY_MOOD`].
    pub primary_mood: String,
}

impl ScoredItem {
    /// Scores `item` against `query`.
    pub fn new(query: &MoodQuery, item: CatalogItem) -> Self {
        let score = score_item(query, &item);
        let primary_mood = primary_mood(&item);
        Self {
            item,
            score,
            primary_mood,
        }
    }
}

/// Returns the relevance of `item` for `query` as an integer percentage.
///
/// A token counts once when it equals a declared mood tag or appears as a
/// substring of the title, description or creator name. Sources are not
/// weighted against each other.
pub fn score_item(query: &MoodQuery, item: &CatalogItem) -> u8 {
    if query.is_empty() {
        return 0;
    }

    let haystacks = Haystacks::from_item(item);
    let hits = query
        .tokens()
        .iter()
        .filter(|token| haystacks.matches(token.as_str()))
        .count();

    percentage(hits, query.len())
}

/// First declared mood tag, or the fallback placeholder.
pub fn primary_mood(item: &CatalogItem) -> String {
    item.mood_tags()
        .into_iter()
        .next()
        .unwrap_or_else(|| FALLBACK_PRIMARY_MOOD.to_string())
}

/// Scores every item, keeping input order.
pub fn score_items<I>(query: &MoodQuery, items: I) -> Vec<ScoredItem>
where
    I: IntoIterator<Item = CatalogItem>,
{
    items
        .into_iter()
        .map(|item| ScoredItem::new(query, item))
        .collect()
}

/// Stable descending sort by score.
pub fn sort_by_score(scored: &mut [ScoredItem]) {
    scored.sort_by(|left, right| right.score.cmp(&left.score));
}

/// Keeps matching items (`score > 0`), best first, capped at `limit`.
///
/// Returns an empty list for an empty query.
pub fn rank_matches<I>(query: &MoodQuery, items: I, limit: Option<usize>) -> Vec<ScoredItem>
where
    I: IntoIterator<Item = CatalogItem>,
{
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked = score_items(query, items)
        .into_iter()
        .filter(|scored| scored.score > 0)
        .collect::<Vec<_>>();
    sort_by_score(&mut ranked);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Newest first by `created_at`; undated items follow in catalog order.
pub fn sort_by_recency(items: &mut [CatalogItem]) {
    items.sort_by(|left, right| match (left.created_at, right.created_at) {
        (Some(l), Some(r)) => r.cmp(&l),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Items authored by a followed creator, in catalog order.
///
/// Independent of any mood score.
pub fn filter_followed<I>(items: I, followed: &BTreeSet<CreatorId>) -> Vec<CatalogItem>
where
    I: IntoIterator<Item = CatalogItem>,
{
    items
        .into_iter()
        .filter(|item| {
            item.creator_id
                .is_some_and(|creator_id| followed.contains(&creator_id))
        })
        .collect()
}

fn percentage(hits: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let hits = hits.min(total);
    // Integer round-half-away-from-zero of 100 * hits / total.
    let rounded = (200 * hits + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

struct Haystacks {
    mood_tags: HashSet<String>,
    title: String,
    description: String,
    creator: String,
}

impl Haystacks {
    fn from_item(item: &CatalogItem) -> Self {
        Self {
            mood_tags: item.mood_tags().into_iter().collect(),
            title: normalize_text(&item.title),
            description: normalize_text(item.description.as_deref().unwrap_or_default()),
            creator: normalize_text(&item.creator_text()),
        }
    }

    fn matches(&self, token: &str) -> bool {
        self.mood_tags.contains(token)
            || self.title.contains(token)
            || self.description.contains(token)
            || self.creator.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::{percentage, primary_mood, sort_by_recency, FALLBACK_PRIMARY_MOOD};
    use crate::model::item::{Attribute, CatalogItem};

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        assert_eq!(percentage(0, 3), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 8), 38);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(1, 0), 0);
    }

    #[test]
    fn primary_mood_uses_first_declared_tag() {
        let mut item = CatalogItem::new("Untitled");
        assert_eq!(primary_mood(&item), FALLBACK_PRIMARY_MOOD);

        item.attributes = vec![
            Attribute::new("palette", "warm"),
            Attribute::mood("Nostalgic"),
            Attribute::mood("calm"),
        ];
        assert_eq!(primary_mood(&item), "nostalgic");
    }

    #[test]
    fn recency_sort_puts_undated_items_last_in_catalog_order() {
        let mut undated_a = CatalogItem::new("a");
        undated_a.created_at = None;
        let mut old = CatalogItem::new("old");
        old.created_at = Some(1_000);
        let undated_b = CatalogItem::new("b");
        let mut new = CatalogItem::new("new");
        new.created_at = Some(2_000);

        let mut items = vec![undated_a, old, undated_b, new];
        sort_by_recency(&mut items);
        let titles: Vec<_> = items.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old", "a", "b"]);
    }
}
