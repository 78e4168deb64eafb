//! Feed and storage configuration.
//!
//! # Invariants
//! - Every field has a default; partial JSON overrides only what it names.
//! - Zero limits are legal and produce empty sections.

use crate::search::relevance::DEFAULT_RANKED_LIMIT;
use serde::{Deserialize, Serialize};

/// Storage key for the last-used mood query.
pub const MOOD_QUERY_KEY: &str = "moodmarket.mood_query";
/// Storage key for the followed-creator set.
pub const FOLLOWING_KEY: &str = "moodmarket.following";

const DEFAULT_SECTION_LIMIT: usize = 12;

/// Section sizes for feed and swipe deck views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Cards dealt into the swipe deck.
    pub deck_size: usize,
    /// Items in the "because you vibed with" section.
    pub vibed_limit: usize,
    /// Items in the "from creators you follow" section.
    pub following_limit: usize,
    /// Items in the trending section.
    pub trending_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            deck_size: DEFAULT_RANKED_LIMIT,
            vibed_limit: DEFAULT_RANKED_LIMIT,
            following_limit: DEFAULT_SECTION_LIMIT,
            trending_limit: DEFAULT_SECTION_LIMIT,
        }
    }
}

impl FeedConfig {
    /// Parses a JSON object, filling unspecified fields with defaults.
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::FeedConfig;

    #[test]
    fn defaults_match_deck_and_section_sizes() {
        let config = FeedConfig::default();
        assert_eq!(config.deck_size, 8);
        assert_eq!(config.vibed_limit, 8);
        assert_eq!(config.following_limit, 12);
        assert_eq!(config.trending_limit, 12);
    }

    #[test]
    fn partial_json_overrides_named_fields_only() {
        let config = FeedConfig::from_json(r#"{"trending_limit": 3}"#).unwrap();
        assert_eq!(config.trending_limit, 3);
        assert_eq!(config.deck_size, 8);
    }
}
