//! Transfer code query functions.
//!
//! Consumption is a single guarded UPDATE so the check-then-increment is
//! race-free: under concurrent uploads against a nearly-exhausted code,
//! the loser's statement matches zero rows and its transaction rolls back.

use remedia_types::{CodeId, PrincipalId, TenantId, TransferCode};
use rusqlite::Connection;

use crate::{map_unique_violation, DbError, Result};

fn row_to_code(row: &rusqlite::Row<'_>) -> rusqlite::Result<TransferCode> {
    Ok(TransferCode {
        id: row.get(0)?,
        code: row.get(1)?,
        is_active: row.get(2)?,
        expires_at: row.get::<_, i64>(3)? as u64,
        max_uses: row.get::<_, i64>(4)? as u32,
        current_uses: row.get::<_, i64>(5)? as u32,
        pharmacy_id: row.get(6)?,
        issued_by: row.get(7)?,
        created_at: row.get::<_, i64>(8)? as u64,
        last_used_at: row.get::<_, Option<i64>>(9)?.map(|v| v as u64),
    })
}

const CODE_COLS: &str = "id, code, is_active, expires_at, max_uses, current_uses, \
                         pharmacy_id, issued_by, created_at, last_used_at";

/// Insert a transfer code row.
///
/// Fails with [`DbError::Duplicate`] when the 6-character code collides
/// with a live row; the issuer redraws and retries. Each attempt is a
/// self-contained check-and-insert — no lock is held around the draw.
pub fn insert(
    conn: &Connection,
    code: &str,
    pharmacy_id: TenantId,
    issued_by: PrincipalId,
    expires_at: u64,
    max_uses: u32,
    now: u64,
) -> Result<CodeId> {
    conn.execute(
        "INSERT INTO transfer_codes
         (code, is_active, expires_at, max_uses, current_uses, pharmacy_id, issued_by, created_at)
         VALUES (?1, 1, ?2, ?3, 0, ?4, ?5, ?6)",
        rusqlite::params![
            code,
            expires_at as i64,
            max_uses as i64,
            pharmacy_id,
            issued_by,
            now as i64,
        ],
    )
    .map_err(|e| map_unique_violation(e, "code"))?;
    Ok(conn.last_insert_rowid())
}

/// Get a code row together with its pharmacy's active flag.
pub fn get_with_tenant(conn: &Connection, code: &str) -> Result<(TransferCode, bool)> {
    conn.query_row(
        "SELECT c.id, c.code, c.is_active, c.expires_at, c.max_uses, c.current_uses,
                c.pharmacy_id, c.issued_by, c.created_at, c.last_used_at, p.is_active
         FROM transfer_codes c JOIN pharmacies p ON p.id = c.pharmacy_id
         WHERE c.code = ?1",
        [code],
        |row| Ok((row_to_code(row)?, row.get::<_, bool>(10)?)),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound("code".into()),
        other => DbError::Sqlite(other),
    })
}

/// Consume one use of a code, re-checking every usability condition in the
/// same statement: active, unexpired, unexhausted, tenant active.
///
/// Returns [`DbError::NotFound`] when no row qualifies — missing, expired,
/// exhausted, deactivated, and tenant-disabled codes are indistinguishable
/// here by design.
pub fn consume(conn: &Connection, code: &str, now: u64) -> Result<()> {
    let updated = conn.execute(
        "UPDATE transfer_codes
         SET current_uses = current_uses + 1, last_used_at = ?2
         WHERE code = ?1
           AND is_active = 1
           AND expires_at > ?2
           AND current_uses < max_uses
           AND pharmacy_id IN (SELECT id FROM pharmacies WHERE is_active = 1)",
        rusqlite::params![code, now as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("code not usable".into()));
    }
    Ok(())
}

/// List a pharmacy's active (unexpired, enabled) codes.
pub fn list_active(conn: &Connection, pharmacy_id: TenantId, now: u64) -> Result<Vec<TransferCode>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CODE_COLS} FROM transfer_codes
         WHERE pharmacy_id = ?1 AND is_active = 1 AND expires_at > ?2
         ORDER BY created_at DESC"
    ))?;

    let rows = stmt
        .query_map(rusqlite::params![pharmacy_id, now as i64], row_to_code)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
