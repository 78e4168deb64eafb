//! Domain model for the mood marketplace core.
//!
//! # Responsibility
//! - Define catalog, mood query and location records used by scoring and
//!   check-in logic.
//! - Keep wire shapes aligned with the backend rows they are decoded from.

pub mod item;
pub mod location;
pub mod mood;
