//! Catalog item domain model.
//!
//! # Responsibility
//! - Define the art item record fetched from the marketplace backend.
//! - Decode optional row fields leniently so one bad row never drops the
//!   catalog.
//!
//! # Invariants
//! - `id` is stable for the lifetime of the backend row.
//! - Malformed attribute entries decode to nothing instead of failing.
//! - A null title decodes to an empty string.
//! - `created_at` accepts epoch milliseconds or an RFC 3339 string; anything
//!   else decodes to `None`.
//! - Mood tags are derived on demand and never cached on the item.

use crate::model::mood::MoodToken;
use chrono::DateTime;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier for a catalog item row.
pub type ItemId = Uuid;

/// Stable identifier for a creator profile.
pub type CreatorId = Uuid;

/// Trait name that marks an attribute as a declared mood tag.
pub const MOOD_TRAIT: &str = "mood";

/// One `{ trait_type, value }` pair attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }

    /// Shorthand for a `trait_type = "mood"` attribute.
    pub fn mood(value: impl Into<String>) -> Self {
        Self::new(MOOD_TRAIT, value)
    }

    /// Returns whether this attribute declares a mood tag.
    pub fn is_mood(&self) -> bool {
        self.trait_type.trim().eq_ignore_ascii_case(MOOD_TRAIT)
    }
}

/// Public creator fields joined onto an item row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl CreatorProfile {
    /// Display name first, username second; empty when neither is known.
    pub fn search_text(&self) -> String {
        [self.display_name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Artwork record shown in feeds, swipe decks and search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(default, deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub creator_id: Option<CreatorId>,
    #[serde(default)]
    pub creator: Option<CreatorProfile>,
    /// Creator-declared traits. Decoded leniently, see module docs.
    #[serde(default, deserialize_with = "deserialize_attributes")]
    pub attributes: Vec<Attribute>,
    /// Unix epoch milliseconds of listing creation.
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<i64>,
    /// Display-only price text. Never interpreted by core.
    #[serde(default)]
    pub price: Option<String>,
}

impl CatalogItem {
    /// Creates an item with a generated id and no optional fields set.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    /// Creates an item with a caller-provided id.
    pub fn with_id(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            image_url: None,
            creator_id: None,
            creator: None,
            attributes: Vec::new(),
            created_at: None,
            price: None,
        }
    }

    /// Declared mood tags, normalized like query tokens, in declaration order.
    ///
    /// Blank values are skipped.
    pub fn mood_tags(&self) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|attribute| attribute.is_mood())
            .filter_map(|attribute| MoodToken::parse(&attribute.value))
            .map(String::from)
            .collect()
    }

    /// Creator text used for matching; empty when no profile is joined.
    pub fn creator_text(&self) -> String {
        self.creator
            .as_ref()
            .map(CreatorProfile::search_text)
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttributes {
    List(Vec<RawAttribute>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAttribute {
    Pair {
        #[serde(default)]
        trait_type: Option<RawValue>,
        #[serde(default)]
        value: Option<RawValue>,
    },
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

impl RawValue {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::Bool(value) => Some(value.to_string()),
            Self::Other(_) => None,
        }
    }
}

fn deserialize_attributes<'de, D>(deserializer: D) -> Result<Vec<Attribute>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawAttributes>::deserialize(deserializer)?;
    let Some(RawAttributes::List(entries)) = raw else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            RawAttribute::Pair { trait_type, value } => Some(Attribute {
                trait_type: trait_type?.into_text()?,
                value: value?.into_text()?,
            }),
            RawAttribute::Other(_) => None,
        })
        .collect())
}

fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(raw.and_then(RawValue::into_text).unwrap_or_default())
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawValue>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawValue::Integer(millis)) => Some(millis),
        Some(RawValue::Text(text)) => parse_timestamp_millis(&text),
        _ => None,
    })
}

fn parse_timestamp_millis(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if let Ok(millis) = trimmed.parse::<i64>() {
        return Some(millis);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp_millis, Attribute, CatalogItem, CreatorProfile};

    #[test]
    fn mood_tags_match_trait_name_case_insensitively() {
        let mut item = CatalogItem::new("Dusk");
        item.attributes = vec![
            Attribute::new("Mood", " Serene "),
            Attribute::new("background", "teal"),
            Attribute::new("MOOD", "Hopeful"),
            Attribute::mood("   "),
        ];

        assert_eq!(item.mood_tags(), vec!["serene", "hopeful"]);
    }

    #[test]
    fn creator_text_joins_known_names() {
        let mut item = CatalogItem::new("Dusk");
        assert_eq!(item.creator_text(), "");

        item.creator = Some(CreatorProfile {
            display_name: Some("Ari Vale".to_string()),
            username: Some("arivale".to_string()),
        });
        assert_eq!(item.creator_text(), "Ari Vale arivale");

        item.creator = Some(CreatorProfile {
            display_name: None,
            username: Some("arivale".to_string()),
        });
        assert_eq!(item.creator_text(), "arivale");
    }

    #[test]
    fn timestamps_accept_millis_and_rfc3339_text() {
        assert_eq!(parse_timestamp_millis("1714564800000"), Some(1_714_564_800_000));
        assert_eq!(
            parse_timestamp_millis("2024-05-01T12:00:00+00:00"),
            Some(1_714_564_800_000)
        );
        assert_eq!(
            parse_timestamp_millis("2024-05-01T12:00:00.250Z"),
            Some(1_714_564_800_250)
        );
        assert_eq!(parse_timestamp_millis("last tuesday"), None);
    }

    #[test]
    fn null_title_and_odd_timestamp_still_decode() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"id": "11111111-2222-4333-8444-555555555555", "title": null,
                "created_at": {"seconds": 5}}"#,
        )
        .unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.created_at, None);
    }
}
