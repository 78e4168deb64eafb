//! Haversine geofence gate.
//!
//! # Responsibility
//! - Compute great-circle distance between two coordinates.
//! - Decide whether a position lies within an unlock radius.
//!
//! # Invariants
//! - Distance uses the mean Earth radius [`EARTH_RADIUS_M`].
//! - A position exactly on the boundary is within range.

use crate::model::location::{GeoPoint, DEFAULT_CHECK_IN_RADIUS_M};
use serde::Serialize;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Result of comparing a position against a target and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeofenceCheck {
    pub within_range: bool,
    /// Exact great-circle distance in meters.
    pub distance_m: f64,
    /// Radius the distance was compared against.
    pub radius_m: f64,
}

impl GeofenceCheck {
    /// Distance rounded to the nearest meter, for display.
    pub fn rounded_distance_m(&self) -> u64 {
        // Distances are bounded by half the Earth's circumference.
        self.distance_m.round() as u64
    }
}

/// Great-circle distance between two points in meters.
pub fn haversine_distance_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat_from = from.lat().to_radians();
    let lat_to = to.lat().to_radians();
    let delta_lat = (to.lat() - from.lat()).to_radians();
    let delta_lon = (to.lon() - from.lon()).to_radians();

    // Rounding can push `a` just past 1.0 for near-antipodal points.
    let a = ((delta_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Compares `position` against `target` using `radius_m`.
///
/// `None`, negative or non-finite radii fall back to
/// [`DEFAULT_CHECK_IN_RADIUS_M`].
pub fn check_geofence(position: GeoPoint, target: GeoPoint, radius_m: Option<f64>) -> GeofenceCheck {
    let radius_m = match radius_m {
        Some(radius) if radius.is_finite() && radius >= 0.0 => radius,
        _ => DEFAULT_CHECK_IN_RADIUS_M,
    };
    let distance_m = haversine_distance_m(position, target);
    GeofenceCheck {
        within_range: distance_m <= radius_m,
        distance_m,
        radius_m,
    }
}
