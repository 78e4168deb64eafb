//! Mood matching entry points.
//!
//! # Responsibility
//! - Expose the pure relevance scorer and its ranking helpers.
//! - Keep scoring free of storage, logging and presentation concerns.

pub mod relevance;
