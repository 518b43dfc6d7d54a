//! # remedia-db
//!
//! Storage layer for the Remedia document exchange. Manages the single
//! SQLite database holding pharmacies, principals, transfer codes, and
//! encrypted documents.
//!
//! ## Schema
//!
//! - WAL mode mandatory
//! - Foreign keys enforced
//! - All timestamps are Unix epoch seconds stored as INTEGER
//! - Schema version stored in `PRAGMA user_version`
//!
//! Query functions take `&Connection` so they compose inside a
//! caller-held transaction (`Transaction` derefs to `Connection`); the
//! code-consumption / document-insert critical section relies on this.

pub mod migrations;
pub mod queries;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Database error types.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A UNIQUE constraint rejected the insert. Random-identifier callers
    /// redraw and retry; business-key callers surface a conflict.
    #[error("duplicate: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Open or create the Remedia database at the given path.
///
/// Configures WAL mode, foreign keys, and runs any pending migrations.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    configure(&conn)?;
    migrations::run(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn)?;
    migrations::run(&conn)?;
    Ok(conn)
}

/// Configure SQLite pragmas.
fn configure(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

/// Map a UNIQUE violation to [`DbError::Duplicate`]; pass the rest through.
pub(crate) fn map_unique_violation(err: rusqlite::Error, what: &str) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            DbError::Duplicate(what.to_string())
        }
        _ => DbError::Sqlite(err),
    }
}
