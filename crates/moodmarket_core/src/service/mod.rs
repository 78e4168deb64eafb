//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate catalog, storage and location seams into screen-level APIs.
//! - Keep presentation and bridge layers decoupled from storage details.

pub mod check_in_service;
pub mod feed_service;
pub mod preference_service;
pub mod swipe_deck;
