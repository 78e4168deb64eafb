//! Mood query and follow-list preferences.
//!
//! # Responsibility
//! - Persist the last-used mood query and followed creators through a
//!   [`KeyValueStore`].
//! - Resolve the initial query from the `q` URL parameter or storage.
//!
//! # Invariants
//! - Stored data is a cache: unreadable values degrade to empty state.
//! - An empty query is never stored; remembering one clears the key.
//! - The followed set is stored as a sorted JSON array of UUID strings.

use crate::config::{FOLLOWING_KEY, MOOD_QUERY_KEY};
use crate::model::item::CreatorId;
use crate::model::mood::MoodQuery;
use crate::store::kv_store::{KeyValueStore, StoreResult};
use log::{debug, warn};
use std::collections::BTreeSet;

/// Preference use-cases over a key-value store.
pub struct PreferenceService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PreferenceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores `query` as the last-used query; empty queries clear it.
    pub fn remember_query(&self, query: &MoodQuery) -> StoreResult<()> {
        if query.is_empty() {
            return self.clear_query();
        }
        self.store.set(MOOD_QUERY_KEY, &query.to_param())
    }

    /// Returns the stored query, re-normalized on read.
    pub fn last_query(&self) -> StoreResult<MoodQuery> {
        let raw = self.store.get(MOOD_QUERY_KEY)?;
        Ok(raw.as_deref().map(MoodQuery::parse).unwrap_or_default())
    }

    pub fn clear_query(&self) -> StoreResult<()> {
        self.store.remove(MOOD_QUERY_KEY)
    }

    /// Resolves the query a screen starts with.
    ///
    /// A non-empty `q` parameter in `url_query` wins and is remembered.
    /// Otherwise the stored query is returned.
    pub fn initial_query(&self, url_query: Option<&str>) -> StoreResult<MoodQuery> {
        let from_url = url_query.map(MoodQuery::from_url_query).unwrap_or_default();
        if !from_url.is_empty() {
            debug!(
                "event=prefs_initial_query module=prefs status=ok source=url tokens={}",
                from_url.len()
            );
            self.remember_query(&from_url)?;
            return Ok(from_url);
        }

        let stored = self.last_query()?;
        debug!(
            "event=prefs_initial_query module=prefs status=ok source=store tokens={}",
            stored.len()
        );
        Ok(stored)
    }

    /// Returns the followed-creator set.
    pub fn following(&self) -> StoreResult<BTreeSet<CreatorId>> {
        let Some(raw) = self.store.get(FOLLOWING_KEY)? else {
            return Ok(BTreeSet::new());
        };

        match serde_json::from_str::<BTreeSet<CreatorId>>(&raw) {
            Ok(set) => Ok(set),
            Err(err) => {
                warn!(
                    "event=prefs_read module=prefs status=degraded key={} error={}",
                    FOLLOWING_KEY, err
                );
                Ok(BTreeSet::new())
            }
        }
    }

    pub fn is_following(&self, creator_id: CreatorId) -> StoreResult<bool> {
        Ok(self.following()?.contains(&creator_id))
    }

    /// Adds `creator_id` to the followed set. Returns `false` if already there.
    pub fn follow(&self, creator_id: CreatorId) -> StoreResult<bool> {
        let mut following = self.following()?;
        let inserted = following.insert(creator_id);
        if inserted {
            self.write_following(&following)?;
        }
        Ok(inserted)
    }

    /// Removes `creator_id`. Returns `false` if it was not followed.
    pub fn unfollow(&self, creator_id: CreatorId) -> StoreResult<bool> {
        let mut following = self.following()?;
        let removed = following.remove(&creator_id);
        if removed {
            self.write_following(&following)?;
        }
        Ok(removed)
    }

    fn write_following(&self, following: &BTreeSet<CreatorId>) -> StoreResult<()> {
        if following.is_empty() {
            return self.store.remove(FOLLOWING_KEY);
        }
        let ids = following.iter().map(ToString::to_string).collect::<Vec<_>>();
        let encoded = serde_json::Value::from(ids).to_string();
        self.store.set(FOLLOWING_KEY, &encoded)
    }
}
