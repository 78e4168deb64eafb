//! Vibe-matching swipe deck state.
//!
//! # Responsibility
//! - Hold the current query, catalog and the derived card order.
//! - Recompute the order explicitly whenever an input is replaced.
//!
//! # Invariants
//! - `cards` is always the result of the last `recompute()` call.
//! - Recompute resets the cursor; likes survive across recomputes.
//! - With a query: best matches first, non-matches excluded. Without one:
//!   newest first.

use crate::config::FeedConfig;
use crate::model::item::{CatalogItem, ItemId};
use crate::model::mood::MoodQuery;
use crate::search::relevance::{rank_matches, score_items, sort_by_recency, ScoredItem};

/// Swipe gesture outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Pass on the card.
    Left,
    /// Like the card.
    Right,
}

/// Deck of cards dealt from the catalog for the current mood.
#[derive(Debug, Clone, Default)]
pub struct SwipeDeck {
    query: MoodQuery,
    catalog: Vec<CatalogItem>,
    deck_size: usize,
    cards: Vec<ScoredItem>,
    cursor: usize,
    liked: Vec<ItemId>,
}

impl SwipeDeck {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            deck_size: config.deck_size,
            ..Self::default()
        }
    }

    /// Replaces the query and recomputes the deck.
    pub fn set_query(&mut self, query: MoodQuery) {
        self.query = query;
        self.recompute();
    }

    /// Replaces the catalog and recomputes the deck.
    pub fn set_catalog(&mut self, catalog: Vec<CatalogItem>) {
        self.catalog = catalog;
        self.recompute();
    }

    /// Rebuilds the card order from the current inputs.
    pub fn recompute(&mut self) {
        self.cards = if self.query.is_empty() {
            let mut newest = self.catalog.clone();
            sort_by_recency(&mut newest);
            newest.truncate(self.deck_size);
            score_items(&self.query, newest)
        } else {
            rank_matches(&self.query, self.catalog.iter().cloned(), Some(self.deck_size))
        };
        self.cursor = 0;
    }

    pub fn query(&self) -> &MoodQuery {
        &self.query
    }

    /// All cards dealt by the last recompute, including swiped ones.
    pub fn cards(&self) -> &[ScoredItem] {
        &self.cards
    }

    /// Top card, if any remain.
    pub fn current(&self) -> Option<&ScoredItem> {
        self.cards.get(self.cursor)
    }

    /// Consumes the top card. Returns it, or `None` when the deck is empty.
    pub fn swipe(&mut self, direction: SwipeDirection) -> Option<&ScoredItem> {
        let card = self.cards.get(self.cursor)?;
        if direction == SwipeDirection::Right && !self.liked.contains(&card.item.id) {
            self.liked.push(card.item.id);
        }
        self.cursor += 1;
        self.cards.get(self.cursor - 1)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Liked item ids in like order.
    pub fn liked(&self) -> &[ItemId] {
        &self.liked
    }
}

#[cfg(test)]
mod tests {
    use super::{SwipeDeck, SwipeDirection};
    use crate::config::FeedConfig;
    use crate::model::item::{Attribute, CatalogItem};
    use crate::model::mood::MoodQuery;

    fn item(title: &str, mood: &str, created_at: i64) -> CatalogItem {
        let mut item = CatalogItem::new(title);
        item.attributes = vec![Attribute::mood(mood)];
        item.created_at = Some(created_at);
        item
    }

    #[test]
    fn deck_recomputes_on_query_change() {
        let mut deck = SwipeDeck::new(&FeedConfig::default());
        deck.set_catalog(vec![
            item("Tide", "serene", 1),
            item("Flare", "chaotic", 3),
            item("Fog", "serene", 2),
        ]);
        let newest: Vec<_> = deck.cards().iter().map(|c| c.item.title.clone()).collect();
        assert_eq!(newest, vec!["Flare", "Fog", "Tide"]);

        deck.set_query(MoodQuery::parse("serene"));
        let matched: Vec<_> = deck.cards().iter().map(|c| c.item.title.clone()).collect();
        assert_eq!(matched, vec!["Tide", "Fog"]);
        assert!(deck.cards().iter().all(|card| card.score == 100));
    }

    #[test]
    fn swiping_tracks_likes_and_exhausts() {
        let mut deck = SwipeDeck::new(&FeedConfig::default());
        deck.set_catalog(vec![item("A", "calm", 1), item("B", "calm", 2)]);
        deck.set_query(MoodQuery::parse("calm"));
        assert_eq!(deck.remaining(), 2);

        let first = deck.swipe(SwipeDirection::Right).map(|c| c.item.id);
        let second = deck.swipe(SwipeDirection::Left).map(|c| c.item.id);
        assert!(deck.is_exhausted());
        assert!(deck.swipe(SwipeDirection::Right).is_none());
        assert_eq!(deck.liked(), &[first.unwrap()]);
        assert_ne!(first, second);

        deck.recompute();
        assert_eq!(deck.remaining(), 2);
        assert_eq!(deck.liked().len(), 1);
    }

    #[test]
    fn deck_size_caps_cards() {
        let config = FeedConfig {
            deck_size: 2,
            ..FeedConfig::default()
        };
        let mut deck = SwipeDeck::new(&config);
        deck.set_catalog((0..5).map(|n| item(&format!("{n}"), "calm", n)).collect());
        assert_eq!(deck.cards().len(), 2);
        deck.set_query(MoodQuery::parse("calm"));
        assert_eq!(deck.cards().len(), 2);
    }
}
