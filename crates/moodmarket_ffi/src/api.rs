//! FFI use-case API for the presentation layer.
//!
//! # Responsibility
//! - Expose mood ranking, check-in and query persistence as sync calls.
//! - Flatten core errors into plain message strings.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Scores and distances are returned already rounded for display.

use moodmarket_core::db::open_db;
use moodmarket_core::{
    check_geofence, core_version as core_version_inner, init_logging as init_logging_inner,
    parse_catalog_json, ping as ping_inner, rank_matches, score_items, sort_by_recency, GeoPoint,
    MoodQuery, PreferenceService, ScoredItem, SqliteKeyValueStore, DEFAULT_RANKED_LIMIT,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const PREFS_DB_FILE_NAME: &str = "moodmarket_prefs.sqlite3";
static PREFS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Health-check call for bridge smoke tests.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Normalized tokens for a raw comma-separated query.
#[flutter_rust_bridge::frb(sync)]
pub fn parse_mood_query(raw: String) -> Vec<String> {
    MoodQuery::parse(&raw)
        .tokens()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// One card in a ranked listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCard {
    pub item_id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub score: u8,
    pub primary_mood: String,
}

/// Ranking response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankResponse {
    pub cards: Vec<RankedCard>,
    /// Normalized query the cards were ranked for.
    pub query: String,
    /// Empty on success; decode failure message otherwise.
    pub error: String,
}

/// Ranks a JSON catalog against a raw mood query.
///
/// Non-empty queries return matches best first, capped at `limit` (default
/// 8). Empty queries return the newest items first, unscored.
#[flutter_rust_bridge::frb(sync)]
pub fn rank_catalog(catalog_json: String, raw_query: String, limit: Option<u32>) -> RankResponse {
    let query = MoodQuery::parse(&raw_query);
    let limit = limit
        .map(|value| value as usize)
        .unwrap_or(DEFAULT_RANKED_LIMIT);

    let mut items = match parse_catalog_json(&catalog_json) {
        Ok(items) => items,
        Err(err) => {
            return RankResponse {
                cards: Vec::new(),
                query: query.to_param(),
                error: format!("rank_catalog failed: {err}"),
            };
        }
    };

    let scored = if query.is_empty() {
        sort_by_recency(&mut items);
        items.truncate(limit);
        score_items(&query, items)
    } else {
        rank_matches(&query, items, Some(limit))
    };

    RankResponse {
        cards: scored.into_iter().map(to_ranked_card).collect(),
        query: query.to_param(),
        error: String::new(),
    }
}

/// Geofence decision for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInResponse {
    pub within_range: bool,
    pub distance_m: u64,
    /// User-facing message; empty when unlocked.
    pub message: String,
}

/// Compares a position read by the client against a drop location.
///
/// Location acquisition failures are reported by the client itself; this
/// call only sees coordinates that were actually obtained.
#[flutter_rust_bridge::frb(sync)]
pub fn check_in_distance(
    user_lat: f64,
    user_lon: f64,
    target_lat: f64,
    target_lon: f64,
    radius_m: Option<f64>,
) -> CheckInResponse {
    let points = GeoPoint::new(user_lat, user_lon)
        .and_then(|user| GeoPoint::new(target_lat, target_lon).map(|target| (user, target)));
    let (user, target) = match points {
        Ok(points) => points,
        Err(err) => {
            return CheckInResponse {
                within_range: false,
                distance_m: 0,
                message: format!("check_in_distance failed: {err}"),
            };
        }
    };

    let check = check_geofence(user, target, radius_m);
    let message = if check.within_range {
        String::new()
    } else {
        format!(
            "You are {}m away; get within {}m to unlock.",
            check.rounded_distance_m(),
            check.radius_m
        )
    };
    CheckInResponse {
        within_range: check.within_range,
        distance_m: check.rounded_distance_m(),
        message,
    }
}

/// Stores the last-used query. Returns an empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn remember_mood_query(raw_query: String) -> String {
    let query = MoodQuery::parse(&raw_query);
    match with_preferences(|prefs| prefs.remember_query(&query).map_err(|err| err.to_string())) {
        Ok(()) => String::new(),
        Err(err) => format!("remember_mood_query failed: {err}"),
    }
}

/// Last stored query in its comma-joined form; empty when none is stored.
#[flutter_rust_bridge::frb(sync)]
pub fn last_mood_query() -> String {
    with_preferences(|prefs| prefs.last_query().map_err(|err| err.to_string()))
        .map(|query| query.to_param())
        .unwrap_or_else(|err| {
            log::warn!("event=prefs_read module=ffi status=degraded error={err}");
            String::new()
        })
}

/// Resolves the starting query from an optional URL query string.
///
/// Falls back to an empty query when storage cannot be read.
#[flutter_rust_bridge::frb(sync)]
pub fn initial_mood_query(url_query: Option<String>) -> String {
    with_preferences(|prefs| {
        prefs
            .initial_query(url_query.as_deref())
            .map_err(|err| err.to_string())
    })
    .map(|query| query.to_param())
    .unwrap_or_else(|err| {
        log::warn!("event=prefs_read module=ffi status=degraded error={err}");
        String::new()
    })
}

fn to_ranked_card(scored: ScoredItem) -> RankedCard {
    RankedCard {
        item_id: scored.item.id.to_string(),
        title: scored.item.title,
        image_url: scored.item.image_url,
        score: scored.score,
        primary_mood: scored.primary_mood,
    }
}

fn resolve_prefs_db_path() -> PathBuf {
    PREFS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MOODMARKET_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(PREFS_DB_FILE_NAME)
        })
        .clone()
}

fn with_preferences<T>(
    f: impl FnOnce(&PreferenceService<SqliteKeyValueStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_prefs_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("prefs DB open failed: {err}"))?;
    let store = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| format!("prefs store init failed: {err}"))?;
    let prefs = PreferenceService::new(store);
    f(&prefs)
}

#[cfg(test)]
mod tests {
    use super::{
        check_in_distance, core_version, init_logging, initial_mood_query, last_mood_query,
        parse_mood_query, ping, rank_catalog, remember_mood_query, PREFS_DB_FILE_NAME,
        PREFS_DB_PATH,
    };

    const CATALOG: &str = r#"[
        {"id": "11111111-2222-4333-8444-555555555555", "title": "Tide",
         "created_at": 2000,
         "attributes": [{"trait_type": "mood", "value": "Serene"}]},
        {"id": "21111111-2222-4333-8444-555555555555", "title": "Riot",
         "created_at": 1000},
        {"id": "31111111-2222-4333-8444-555555555555", "title": "Serene Fog",
         "created_at": 3000,
         "attributes": [{"trait_type": "mood", "value": "hopeful"}]}
    ]"#;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn parse_mood_query_normalizes_tokens() {
        assert_eq!(
            parse_mood_query(" Serene ,, HOPEFUL".to_string()),
            vec!["serene", "hopeful"]
        );
    }

    #[test]
    fn rank_catalog_scores_and_orders_matches() {
        let response = rank_catalog(CATALOG.to_string(), "serene,hopeful".to_string(), None);
        assert!(response.error.is_empty());
        assert_eq!(response.query, "serene,hopeful");

        let ranked: Vec<_> = response
            .cards
            .iter()
            .map(|card| (card.title.as_str(), card.score))
            .collect();
        assert_eq!(ranked, vec![("Serene Fog", 100), ("Tide", 50)]);
        assert_eq!(response.cards[1].primary_mood, "serene");
    }

    #[test]
    fn rank_catalog_with_empty_query_returns_newest_first() {
        let response = rank_catalog(CATALOG.to_string(), String::new(), Some(2));
        let titles: Vec<_> = response.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Serene Fog", "Tide"]);
        assert!(response.cards.iter().all(|card| card.score == 0));
    }

    #[test]
    fn rank_catalog_reports_decode_failure() {
        let response = rank_catalog("not json".to_string(), "calm".to_string(), None);
        assert!(response.cards.is_empty());
        assert!(response.error.starts_with("rank_catalog failed"));
    }

    #[test]
    fn check_in_distance_reports_rejection_message() {
        let response = check_in_distance(0.0, 0.00045, 0.0, 0.0, None);
        assert!(!response.within_range);
        assert_eq!(response.distance_m, 50);
        assert!(response.message.contains("50m away"));

        let inside = check_in_distance(10.0, 10.0, 10.0, 10.0, Some(0.0));
        assert!(inside.within_range);
        assert!(inside.message.is_empty());

        let invalid = check_in_distance(100.0, 0.0, 0.0, 0.0, None);
        assert!(!invalid.within_range);
        assert!(invalid.message.contains("latitude"));
    }

    #[test]
    fn remembered_query_seeds_initial_query() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join(PREFS_DB_FILE_NAME);
        assert_eq!(PREFS_DB_PATH.get_or_init(|| db_path.clone()), &db_path);

        assert_eq!(remember_mood_query("Dreamy, Wild".to_string()), "");
        assert_eq!(last_mood_query(), "dreamy,wild");
        assert_eq!(initial_mood_query(None), "dreamy,wild");
        assert_eq!(initial_mood_query(Some("q=calm".to_string())), "calm");
        assert_eq!(initial_mood_query(None), "calm");
    }
}
