//! Retention enforcement.
//!
//! Documents carry their deletion date from the moment of upload; the
//! sweep removes every document at or past it, across all pharmacies,
//! viewed or not.

use remedia_db::queries;
use rusqlite::Connection;

use crate::Result;

/// Remove all documents whose retention boundary has passed. Returns the
/// number removed.
pub fn sweep_expired(conn: &Connection, now: u64) -> Result<usize> {
    let purged = queries::documents::purge_expired(conn, now)?;
    if purged > 0 {
        tracing::info!(purged, "expired documents swept");
    }
    Ok(purged)
}
