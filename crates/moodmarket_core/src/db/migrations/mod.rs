//! Ordered schema steps for the client storage database.
//!
//! # Invariants
//! - Step `n` (1-based) upgrades the schema to version `n`; steps are
//!   append-only.
//! - `PRAGMA user_version` always equals the last applied step.
//! - All pending steps apply in one transaction or not at all.

use crate::store::kv_store::{StoreError, StoreResult};
use log::debug;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("0001_client_storage.sql")];

/// Schema version this binary reads and writes.
pub const SCHEMA_VERSION: u32 = STEPS.len() as u32;

/// Current `user_version` of `conn`.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Brings `conn` up to [`SCHEMA_VERSION`], returning the version it started at.
pub(crate) fn migrate(conn: &mut Connection) -> StoreResult<u32> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    for (version, sql) in (1u32..).zip(STEPS).skip(found as usize) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        debug!("event=db_migrate module=db status=applied version={version}");
    }
    tx.commit()?;
    Ok(found)
}
