//! Catalog source contracts and simple implementations.
//!
//! # Responsibility
//! - Define how services obtain the item catalog for one screen load.
//! - Decode backend JSON rows into [`CatalogItem`] values.
//!
//! # Invariants
//! - Every call is a fresh fetch; sources do not cache between calls.
//! - A whole-payload decode failure is an error; bad attributes inside a
//!   row are not.

use crate::model::item::CatalogItem;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog fetch error.
#[derive(Debug)]
pub enum CatalogError {
    /// Payload could not be decoded into catalog rows.
    Decode(serde_json::Error),
    /// Transport or backend failure reported by the source.
    Unavailable(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid catalog payload: {err}"),
            Self::Unavailable(message) => write!(f, "catalog unavailable: {message}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Supplier of catalog rows for a screen.
pub trait CatalogSource {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError>;
}

impl<C: CatalogSource + ?Sized> CatalogSource for &C {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        (**self).fetch_catalog()
    }
}

/// In-memory catalog, returned as-is on every fetch.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self.items.clone())
    }
}

/// Catalog decoded from a JSON array of backend rows on every fetch.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    payload: String,
}

impl JsonCatalog {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl CatalogSource for JsonCatalog {
    fn fetch_catalog(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        parse_catalog_json(&self.payload)
    }
}

/// Decodes a JSON array of catalog rows.
pub fn parse_catalog_json(payload: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    Ok(serde_json::from_str(payload)?)
}
