//! Location-gated unlock logic.
//!
//! # Responsibility
//! - Haversine distance and radius checks for ghost drop check-ins.
//! - Location capability abstraction with distinct failure kinds.

pub mod geofence;
pub mod location;
