//! Client storage abstractions.
//!
//! # Responsibility
//! - Define the key-value contract application glue persists through.
//! - Keep SQLite details out of service code.

pub mod kv_store;
