//! Ghost drop check-in use-case.
//!
//! # Responsibility
//! - Read the user's position once and gate a ghost drop unlock on it.
//! - Report location failures and out-of-range rejections distinctly.
//!
//! # Invariants
//! - Exactly one location request per check-in; failures are not retried.
//! - Out-of-range errors carry the distance rounded to the nearest meter.

use crate::geo::geofence::{check_geofence, GeofenceCheck};
use crate::geo::location::{LocationError, LocationProvider};
use crate::model::location::GhostDrop;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Check-in failure.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInError {
    /// Position could not be read.
    Location(LocationError),
    /// Position was read but lies outside the unlock radius.
    OutOfRange { distance_m: u64, radius_m: f64 },
}

impl Display for CheckInError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location(err) => write!(f, "{err}"),
            Self::OutOfRange {
                distance_m,
                radius_m,
            } => write!(
                f,
                "you are {distance_m}m away; get within {radius_m}m to unlock"
            ),
        }
    }
}

impl Error for CheckInError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Location(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<LocationError> for CheckInError {
    fn from(value: LocationError) -> Self {
        Self::Location(value)
    }
}

/// Check-in use-cases over a location provider.
pub struct CheckInService<L: LocationProvider> {
    location: L,
}

impl<L: LocationProvider> CheckInService<L> {
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// Attempts to unlock `ghost_drop` from the current position.
    ///
    /// Returns the passing check on success.
    pub fn check_in(&self, ghost_drop: &GhostDrop) -> Result<GeofenceCheck, CheckInError> {
        let position = self.location.current_position().inspect_err(|err| {
            warn!(
                "event=check_in module=geo status=error drop_id={} error_code={}",
                ghost_drop.id,
                err.code()
            );
        })?;

        let check = check_geofence(
            position,
            ghost_drop.location,
            Some(ghost_drop.effective_radius_m()),
        );
        if !check.within_range {
            info!(
                "event=check_in module=geo status=rejected drop_id={} distance_m={} radius_m={}",
                ghost_drop.id,
                check.rounded_distance_m(),
                check.radius_m
            );
            return Err(CheckInError::OutOfRange {
                distance_m: check.rounded_distance_m(),
                radius_m: check.radius_m,
            });
        }

        info!(
            "event=check_in module=geo status=ok drop_id={} distance_m={}",
            ghost_drop.id,
            check.rounded_distance_m()
        );
        Ok(check)
    }
}
