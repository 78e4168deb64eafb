//! SQLite bootstrap for persisted client storage.
//!
//! Connections handed out here are already migrated to [`SCHEMA_VERSION`];
//! failures surface as [`crate::store::kv_store::StoreError`].

mod migrations;
mod open;

pub use migrations::{schema_version, SCHEMA_VERSION};
pub use open::{open_db, open_db_in_memory};
