//! Device location seam.
//!
//! # Responsibility
//! - Abstract the client's location capability behind a trait.
//! - Keep the three failure kinds distinct for user-facing messages.
//!
//! # Invariants
//! - Providers answer one request per call; callers never retry implicitly.

use crate::model::location::GeoPoint;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why the current position could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    /// The client has no location capability at all.
    Unavailable,
    /// The user declined the location prompt.
    PermissionDenied,
    /// The location request did not answer in time.
    Timeout,
}

impl LocationError {
    /// Stable code for logs and bridge envelopes.
    pub fn code(self) -> &'static str {
        match self {
            Self::Unavailable => "location_unavailable",
            Self::PermissionDenied => "location_permission_denied",
            Self::Timeout => "location_timeout",
        }
    }
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "location is not supported on this device"),
            Self::PermissionDenied => {
                write!(f, "location permission was denied; allow access and try again")
            }
            Self::Timeout => write!(f, "location request timed out; try again"),
        }
    }
}

impl Error for LocationError {}

/// Source of the user's current position.
pub trait LocationProvider {
    fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Provider that always answers with the same result.
///
/// Used by tests and by the CLI, where coordinates come from arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation(Result<GeoPoint, LocationError>);

impl FixedLocation {
    pub fn at(point: GeoPoint) -> Self {
        Self(Ok(point))
    }

    pub fn failing(error: LocationError) -> Self {
        Self(Err(error))
    }
}

impl LocationProvider for FixedLocation {
    fn current_position(&self) -> Result<GeoPoint, LocationError> {
        self.0
    }
}

impl<L: LocationProvider + ?Sized> LocationProvider for &L {
    fn current_position(&self) -> Result<GeoPoint, LocationError> {
        (**self).current_position()
    }
}

#[cfg(test)]
mod tests {
    use super::LocationError;

    #[test]
    fn failure_kinds_have_distinct_codes_and_messages() {
        let kinds = [
            LocationError::Unavailable,
            LocationError::PermissionDenied,
            LocationError::Timeout,
        ];
        for (index, left) in kinds.iter().enumerate() {
            for right in &kinds[index + 1..] {
                assert_ne!(left.code(), right.code());
                assert_ne!(left.to_string(), right.to_string());
            }
        }
    }
}
