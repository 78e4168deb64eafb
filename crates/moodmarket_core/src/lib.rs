//! Core logic for the MoodMarket client.
//! Mood relevance scoring, ghost drop geofencing and the storage and feed
//! glue around them. Presentation layers call in; nothing here renders.

pub mod config;
pub mod db;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::{FeedConfig, FOLLOWING_KEY, MOOD_QUERY_KEY};
pub use geo::geofence::{check_geofence, haversine_distance_m, GeofenceCheck, EARTH_RADIUS_M};
pub use geo::location::{FixedLocation, LocationError, LocationProvider};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::item::{Attribute, CatalogItem, CreatorId, CreatorProfile, ItemId};
pub use model::location::{GeoPoint, GeoPointError, GhostDrop, DEFAULT_CHECK_IN_RADIUS_M};
pub use model::mood::{MoodQuery, MoodToken, MAX_MOOD_TOKENS};
pub use repo::catalog_repo::{
    parse_catalog_json, CatalogError, CatalogSource, JsonCatalog, StaticCatalog,
};
pub use search::relevance::{
    filter_followed, rank_matches, score_item, score_items, sort_by_recency, sort_by_score,
    ScoredItem, DEFAULT_RANKED_LIMIT, FALLBACK_PRIMARY_MOOD,
};
pub use service::check_in_service::{CheckInError, CheckInService};
pub use service::feed_service::{build_feed, Feed, FeedService};
pub use service::preference_service::PreferenceService;
pub use service::swipe_deck::{SwipeDeck, SwipeDirection};
pub use store::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
