//! Mood token and query model.
//!
//! # Responsibility
//! - Normalize user-typed mood words into comparable tokens.
//! - Parse comma-separated queries from input fields and the `q` URL param.
//!
//! # Invariants
//! - Tokens are trimmed, lowercased and never empty.
//! - A query holds at most [`MAX_MOOD_TOKENS`] tokens, in input order.
//! - Duplicate tokens are kept; each one counts on its own when scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Maximum number of tokens one query may carry.
pub const MAX_MOOD_TOKENS: usize = 5;

/// URL query parameter that seeds the mood query on page load.
pub const MOOD_QUERY_PARAM: &str = "q";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Trims, lowercases and collapses whitespace runs to one space.
///
/// Shared by tokens and the text they are matched against.
pub(crate) fn normalize_text(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").to_lowercase()
}

/// One normalized mood word or phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoodToken(String);

impl MoodToken {
    /// Normalizes raw input; returns `None` when nothing remains.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_text(raw);
        if normalized.is_empty() {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MoodToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MoodToken {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| "mood token must not be blank".to_string())
    }
}

impl From<MoodToken> for String {
    fn from(value: MoodToken) -> Self {
        value.0
    }
}

/// Ordered list of mood tokens typed by the user.
///
/// An empty query means "no filter", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredMoodQuery")]
pub struct MoodQuery {
    tokens: Vec<MoodToken>,
}

/// Decoded form of a query; normalized through [`MoodQuery::from_fragments`].
#[derive(Deserialize)]
struct StoredMoodQuery {
    #[serde(default)]
    tokens: Vec<String>,
}

impl From<StoredMoodQuery> for MoodQuery {
    fn from(value: StoredMoodQuery) -> Self {
        Self::from_fragments(value.tokens.iter().map(String::as_str))
    }
}

impl MoodQuery {
    /// Parses a comma-separated list, keeping the first five usable tokens.
    pub fn parse(raw: &str) -> Self {
        Self::from_fragments(raw.split(','))
    }

    fn from_fragments<'a>(fragments: impl IntoIterator<Item = &'a str>) -> Self {
        let tokens = fragments
            .into_iter()
            .filter_map(MoodToken::parse)
            .take(MAX_MOOD_TOKENS)
            .collect();
        Self { tokens }
    }

    /// Reads the `q` parameter from a URL query string.
    ///
    /// Accepts an optional leading `?`. Missing or blank `q` yields an empty
    /// query. The first `q` wins when the parameter repeats.
    pub fn from_url_query(query_string: &str) -> Self {
        let trimmed = query_string.trim().trim_start_matches('?');
        url::form_urlencoded::parse(trimmed.as_bytes())
            .find(|(key, _)| key == MOOD_QUERY_PARAM)
            .map(|(_, value)| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn tokens(&self) -> &[MoodToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Comma-joined form used for storage and URLs.
    pub fn to_param(&self) -> String {
        self.join(",")
    }

    /// Heading text for "because you vibed with ..." sections.
    pub fn label(&self) -> String {
        self.join(", ")
    }

    fn join(&self, separator: &str) -> String {
        self.tokens
            .iter()
            .map(MoodToken::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
