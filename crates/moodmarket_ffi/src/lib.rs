//! Presentation-facing bridge over `moodmarket_core`.

pub mod api;
