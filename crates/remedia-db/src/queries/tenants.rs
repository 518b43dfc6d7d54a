//! Pharmacy (tenant) query functions.

use remedia_types::{Pharmacy, TenantId};
use rusqlite::Connection;

use crate::{map_unique_violation, DbError, Result};

fn row_to_pharmacy(row: &rusqlite::Row<'_>) -> rusqlite::Result<Pharmacy> {
    Ok(Pharmacy {
        id: row.get(0)?,
        tenant_code: row.get(1)?,
        name: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        postal_code: row.get(5)?,
        phone: row.get(6)?,
        contact_email: row.get(7)?,
        is_active: row.get(8)?,
        created_at: row.get::<_, i64>(9)? as u64,
        updated_at: row.get::<_, i64>(10)? as u64,
    })
}

const PHARMACY_COLS: &str = "id, tenant_code, name, address, city, postal_code, phone, \
                             contact_email, is_active, created_at, updated_at";

/// Insert a pharmacy.
///
/// Fails with [`DbError::Duplicate`] when the tenant code collides with a
/// live row; the registry redraws and retries.
pub fn insert(
    conn: &Connection,
    tenant_code: &str,
    name: &str,
    address: Option<&str>,
    city: Option<&str>,
    postal_code: Option<&str>,
    phone: Option<&str>,
    contact_email: Option<&str>,
    now: u64,
) -> Result<TenantId> {
    conn.execute(
        "INSERT INTO pharmacies
         (tenant_code, name, address, city, postal_code, phone, contact_email,
          is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
        rusqlite::params![
            tenant_code,
            name,
            address,
            city,
            postal_code,
            phone,
            contact_email,
            now as i64,
        ],
    )
    .map_err(|e| map_unique_violation(e, "tenant_code"))?;
    Ok(conn.last_insert_rowid())
}

/// Get a pharmacy by id.
pub fn get(conn: &Connection, id: TenantId) -> Result<Pharmacy> {
    conn.query_row(
        &format!("SELECT {PHARMACY_COLS} FROM pharmacies WHERE id = ?1"),
        [id],
        row_to_pharmacy,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound("pharmacy".into()),
        other => DbError::Sqlite(other),
    })
}

/// Get a pharmacy by tenant code (exact match; callers normalize first).
pub fn get_by_code(conn: &Connection, tenant_code: &str) -> Result<Pharmacy> {
    conn.query_row(
        &format!("SELECT {PHARMACY_COLS} FROM pharmacies WHERE tenant_code = ?1"),
        [tenant_code],
        row_to_pharmacy,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound("pharmacy".into()),
        other => DbError::Sqlite(other),
    })
}

/// Whether any pharmacy already uses this contact email.
pub fn contact_email_in_use(conn: &Connection, email: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pharmacies WHERE contact_email = ?1",
        [email],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Whether any pharmacy already uses this phone number.
pub fn phone_in_use(conn: &Connection, phone: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pharmacies WHERE phone = ?1",
        [phone],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Deactivate a pharmacy (soft; the row and its tenant code survive).
pub fn deactivate(conn: &Connection, id: TenantId, now: u64) -> Result<()> {
    let updated = conn.execute(
        "UPDATE pharmacies SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        rusqlite::params![id, now as i64],
    )?;
    if updated == 0 {
        return Err(DbError::NotFound("pharmacy".into()));
    }
    Ok(())
}
