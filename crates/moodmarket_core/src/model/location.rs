//! Geographic point and ghost drop model.
//!
//! # Invariants
//! - `GeoPoint` coordinates are finite, latitude in [-90, 90] and longitude
//!   in [-180, 180].
//! - A ghost drop without an explicit radius uses
//!   [`DEFAULT_CHECK_IN_RADIUS_M`].

use crate::model::item::ItemId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unlock radius used when a drop does not declare one.
pub const DEFAULT_CHECK_IN_RADIUS_M: f64 = 50.0;

/// WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(value: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lon)
    }
}

impl GeoPoint {
    /// Validates and builds a coordinate.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::InvalidLatitude(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(GeoPointError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Coordinate validation errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoPointError {
    InvalidLatitude(f64),
    InvalidLongitude(f64),
}

impl Display for GeoPointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLatitude(value) => {
                write!(f, "latitude must be within [-90, 90], got {value}")
            }
            Self::InvalidLongitude(value) => {
                write!(f, "longitude must be within [-180, 180], got {value}")
            }
        }
    }
}

impl Error for GeoPointError {}

/// Location-gated unlockable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostDrop {
    pub id: ItemId,
    pub title: String,
    pub location: GeoPoint,
    /// Unlock radius in meters. `None` means the default radius.
    #[serde(default)]
    pub radius_m: Option<f64>,
}

impl GhostDrop {
    pub fn new(id: ItemId, title: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            title: title.into(),
            location,
            radius_m: None,
        }
    }

    /// Declared radius, falling back to the default.
    ///
    /// Negative or non-finite declarations are treated as undeclared.
    pub fn effective_radius_m(&self) -> f64 {
        match self.radius_m {
            Some(radius) if radius.is_finite() && radius >= 0.0 => radius,
            _ => DEFAULT_CHECK_IN_RADIUS_M,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, GeoPointError, GhostDrop, DEFAULT_CHECK_IN_RADIUS_M};
    use uuid::Uuid;

    #[test]
    fn geo_point_rejects_out_of_range_values() {
        assert_eq!(
            GeoPoint::new(91.0, 0.0).unwrap_err(),
            GeoPointError::InvalidLatitude(91.0)
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.5).unwrap_err(),
            GeoPointError::InvalidLongitude(-180.5)
        );
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn geo_point_deserialization_validates() {
        let err = serde_json::from_str::<GeoPoint>(r#"{"lat": 120.0, "lon": 0.0}"#).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn ghost_drop_radius_defaults_to_fifty_meters() {
        let point = GeoPoint::new(52.52, 13.405).unwrap();
        let mut drop = GhostDrop::new(Uuid::new_v4(), "Tiergarten", point);
        assert_eq!(drop.effective_radius_m(), DEFAULT_CHECK_IN_RADIUS_M);

        drop.radius_m = Some(120.0);
        assert_eq!(drop.effective_radius_m(), 120.0);

        drop.radius_m = Some(-1.0);
        assert_eq!(drop.effective_radius_m(), DEFAULT_CHECK_IN_RADIUS_M);
    }
}
