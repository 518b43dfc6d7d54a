//! Staff principal query functions.

use remedia_types::{Principal, PrincipalId, TenantId};
use rusqlite::Connection;

use crate::{map_unique_violation, DbError, Result};

/// Insert a principal. Fails with [`DbError::Duplicate`] on a taken email.
pub fn insert(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    full_name: Option<&str>,
    pharmacy_id: TenantId,
    now: u64,
) -> Result<PrincipalId> {
    conn.execute(
        "INSERT INTO principals
         (email, password_hash, full_name, is_active, pharmacy_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, 1, ?4, ?5, ?5)",
        rusqlite::params![email, password_hash, full_name, pharmacy_id, now as i64],
    )
    .map_err(|e| map_unique_violation(e, "email"))?;
    Ok(conn.last_insert_rowid())
}

/// Get a principal and their stored password digest by email.
pub fn get_by_email(conn: &Connection, email: &str) -> Result<(Principal, String)> {
    conn.query_row(
        "SELECT id, email, full_name, is_active, pharmacy_id, created_at, updated_at,
                password_hash
         FROM principals WHERE email = ?1",
        [email],
        |row| {
            Ok((
                Principal {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    full_name: row.get(2)?,
                    is_active: row.get(3)?,
                    pharmacy_id: row.get(4)?,
                    created_at: row.get::<_, i64>(5)? as u64,
                    updated_at: row.get::<_, i64>(6)? as u64,
                },
                row.get::<_, String>(7)?,
            ))
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound("principal".into()),
        other => DbError::Sqlite(other),
    })
}

/// Whether any principal already uses this email.
pub fn email_in_use(conn: &Connection, email: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM principals WHERE email = ?1",
        [email],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::tenants;

    fn test_db() -> (Connection, TenantId) {
        let conn = crate::open_memory().expect("open test db");
        let pharmacy_id = tenants::insert(
            &conn, "PH-TEST", "Test", None, None, None, None, None, 0,
        )
        .expect("insert pharmacy");
        (conn, pharmacy_id)
    }

    #[test]
    fn test_insert_and_get() {
        let (conn, pharmacy_id) = test_db();
        insert(
            &conn,
            "anne@example.org",
            "$argon2id$stub",
            Some("Anne Martin"),
            pharmacy_id,
            500,
        )
        .expect("insert");

        let (principal, hash) = get_by_email(&conn, "anne@example.org").expect("get");
        assert_eq!(principal.full_name.as_deref(), Some("Anne Martin"));
        assert_eq!(principal.pharmacy_id, pharmacy_id);
        assert!(principal.is_active);
        assert_eq!(hash, "$argon2id$stub");
    }

    #[test]
    fn test_email_unique() {
        let (conn, pharmacy_id) = test_db();
        insert(&conn, "a@example.org", "h", None, pharmacy_id, 0).expect("first");
        let err = insert(&conn, "a@example.org", "h", None, pharmacy_id, 0);
        assert!(matches!(err, Err(DbError::Duplicate(_))));
    }

    #[test]
    fn test_missing_email() {
        let (conn, _) = test_db();
        assert!(matches!(
            get_by_email(&conn, "ghost@example.org"),
            Err(DbError::NotFound(_))
        ));
        assert!(!email_in_use(&conn, "ghost@example.org").expect("check"));
    }
}
