//! Catalog data access abstractions.
//!
//! # Responsibility
//! - Define the fetch contract services read catalog rows through.
//! - Isolate payload decoding from feed and deck orchestration.
//!
//! # Invariants
//! - Sources surface fetch failures as errors; they never substitute data.

pub mod catalog_repo;
