//! Anonymous-side validation and use consumption.
//!
//! Everything here faces untrusted callers. All failure modes collapse to
//! [`CodeError::CodeInvalid`]: which condition failed (unknown code,
//! expiry, exhaustion, deactivation, disabled pharmacy) is never revealed.

use remedia_db::{queries, DbError};
use remedia_types::TransferCode;
use rusqlite::Connection;

use crate::{CodeError, Result};

/// Check whether a presented code admits an upload right now, returning
/// the code row on success so the caller knows which pharmacy it scopes.
///
/// This is a pure read; the matching use is burned by [`consume`] inside
/// the storing transaction, which re-checks every condition.
pub fn validate(conn: &Connection, code: &str, now: u64) -> Result<TransferCode> {
    let (row, tenant_active) = match queries::codes::get_with_tenant(conn, code) {
        Ok(pair) => pair,
        Err(DbError::NotFound(_)) => return Err(CodeError::CodeInvalid),
        Err(e) => return Err(e.into()),
    };

    if !tenant_active || !row.usable_at(now) {
        return Err(CodeError::CodeInvalid);
    }

    Ok(row)
}

/// Burn one use of a code.
///
/// Backed by a single guarded UPDATE, so two concurrent redemptions of a
/// code with one use left resolve to exactly one winner. Run inside the
/// same transaction that stores the admitted document.
pub fn consume(conn: &Connection, code: &str, now: u64) -> Result<()> {
    match queries::codes::consume(conn, code, now) {
        Ok(()) => {
            tracing::debug!("transfer code use consumed");
            Ok(())
        }
        Err(DbError::NotFound(_)) => Err(CodeError::CodeInvalid),
        Err(e) => Err(e.into()),
    }
}
