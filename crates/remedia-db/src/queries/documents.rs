//! Document query functions.
//!
//! Every read and delete is scoped by pharmacy id; a wrong-tenant id is
//! indistinguishable from a missing row. Ciphertext is fetched only by
//! [`fetch_scoped`] — listings carry metadata alone.

use remedia_types::{CodeId, Document, DocumentId, TenantId};
use rusqlite::Connection;

use crate::{DbError, Result};

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: row.get(0)?,
        stored_name: row.get(1)?,
        original_name: row.get(2)?,
        size_bytes: row.get::<_, i64>(3)? as u64,
        extension: row.get(4)?,
        mime_type: row.get(5)?,
        is_viewed: row.get(6)?,
        viewed_at: row.get::<_, Option<i64>>(7)?.map(|v| v as u64),
        delete_after: row.get::<_, i64>(8)? as u64,
        uploaded_at: row.get::<_, i64>(9)? as u64,
        pharmacy_id: row.get(10)?,
        code_id: row.get(11)?,
    })
}

const DOCUMENT_COLS: &str = "id, stored_name, original_name, size_bytes, extension, mime_type, \
                             is_viewed, viewed_at, delete_after, uploaded_at, pharmacy_id, code_id";

/// Insert a document row with its sealed content.
pub fn insert(
    conn: &Connection,
    stored_name: &str,
    original_name: &str,
    size_bytes: u64,
    extension: &str,
    mime_type: &str,
    ciphertext: &[u8],
    delete_after: u64,
    pharmacy_id: TenantId,
    code_id: CodeId,
    now: u64,
) -> Result<DocumentId> {
    conn.execute(
        "INSERT INTO documents
         (stored_name, original_name, size_bytes, extension, mime_type, ciphertext,
          is_viewed, delete_after, uploaded_at, pharmacy_id, code_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            stored_name,
            original_name,
            size_bytes as i64,
            extension,
            mime_type,
            ciphertext,
            delete_after as i64,
            now as i64,
            pharmacy_id,
            code_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// List a pharmacy's documents, newest first. Metadata only.
pub fn list_for_tenant(conn: &Connection, pharmacy_id: TenantId) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCUMENT_COLS} FROM documents
         WHERE pharmacy_id = ?1
         ORDER BY uploaded_at DESC, id DESC"
    ))?;

    let rows = stmt
        .query_map([pharmacy_id], row_to_document)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Fetch one document and its ciphertext, scoped to a pharmacy.
pub fn fetch_scoped(
    conn: &Connection,
    id: DocumentId,
    pharmacy_id: TenantId,
) -> Result<(Document, Vec<u8>)> {
    conn.query_row(
        &format!(
            "SELECT {DOCUMENT_COLS}, ciphertext FROM documents
             WHERE id = ?1 AND pharmacy_id = ?2"
        ),
        rusqlite::params![id, pharmacy_id],
        |row| Ok((row_to_document(row)?, row.get::<_, Vec<u8>>(12)?)),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => DbError::NotFound("document".into()),
        other => DbError::Sqlite(other),
    })
}

/// Record the first view of a document. Later views leave the original
/// timestamp in place, so the call is idempotent.
pub fn mark_viewed(conn: &Connection, id: DocumentId, now: u64) -> Result<()> {
    conn.execute(
        "UPDATE documents SET is_viewed = 1, viewed_at = ?2
         WHERE id = ?1 AND is_viewed = 0",
        rusqlite::params![id, now as i64],
    )?;
    Ok(())
}

/// Delete one document, scoped to a pharmacy.
pub fn delete_scoped(conn: &Connection, id: DocumentId, pharmacy_id: TenantId) -> Result<()> {
    let deleted = conn.execute(
        "DELETE FROM documents WHERE id = ?1 AND pharmacy_id = ?2",
        rusqlite::params![id, pharmacy_id],
    )?;
    if deleted == 0 {
        return Err(DbError::NotFound("document".into()));
    }
    Ok(())
}

/// Delete every document whose retention boundary has passed, across all
/// pharmacies. Returns the number of rows removed.
pub fn purge_expired(conn: &Connection, now: u64) -> Result<usize> {
    let purged = conn.execute(
        "DELETE FROM documents WHERE delete_after <= ?1",
        [now as i64],
    )?;
    Ok(purged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{codes, principals, tenants};
    use remedia_types::PrincipalId;

    fn test_db() -> (Connection, TenantId, CodeId) {
        let conn = crate::open_memory().expect("open test db");
        let pharmacy_id = tenants::insert(
            &conn, "PH-TEST", "Test", None, None, None, None, None, 0,
        )
        .expect("insert pharmacy");
        let principal_id: PrincipalId =
            principals::insert(&conn, "p@example.org", "h", None, pharmacy_id, 0)
                .expect("insert principal");
        let code_id = codes::insert(&conn, "CODE01", pharmacy_id, principal_id, 3_600, 1, 0)
            .expect("insert code");
        (conn, pharmacy_id, code_id)
    }

    fn add_document(
        conn: &Connection,
        pharmacy_id: TenantId,
        code_id: CodeId,
        name: &str,
        delete_after: u64,
        now: u64,
    ) -> DocumentId {
        insert(
            conn,
            &format!("{now}_{name}"),
            name,
            4,
            "pdf",
            "application/pdf",
            b"ct\x00\x01",
            delete_after,
            pharmacy_id,
            code_id,
            now,
        )
        .expect("insert document")
    }

    #[test]
    fn test_insert_fetch_roundtrip() {
        let (conn, pharmacy_id, code_id) = test_db();
        let id = add_document(&conn, pharmacy_id, code_id, "rx.pdf", 9_000, 100);

        let (doc, ciphertext) = fetch_scoped(&conn, id, pharmacy_id).expect("fetch");
        assert_eq!(doc.stored_name, "100_rx.pdf");
        assert_eq!(doc.original_name, "rx.pdf");
        assert_eq!(doc.size_bytes, 4);
        assert_eq!(doc.delete_after, 9_000);
        assert!(!doc.is_viewed);
        assert_eq!(ciphertext, b"ct\x00\x01");
    }

    #[test]
    fn test_fetch_wrong_tenant_is_not_found() {
        let (conn, pharmacy_id, code_id) = test_db();
        let other = tenants::insert(
            &conn, "PH-OTHER", "Other", None, None, None, None, None, 0,
        )
        .expect("insert other pharmacy");
        let id = add_document(&conn, pharmacy_id, code_id, "rx.pdf", 9_000, 100);

        let err = fetch_scoped(&conn, id, other);
        assert!(matches!(err, Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_newest_first_without_ciphertext() {
        let (conn, pharmacy_id, code_id) = test_db();
        add_document(&conn, pharmacy_id, code_id, "old.pdf", 9_000, 100);
        add_document(&conn, pharmacy_id, code_id, "new.pdf", 9_000, 200);

        let docs = list_for_tenant(&conn, pharmacy_id).expect("list");
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].original_name, "new.pdf");
        assert_eq!(docs[1].original_name, "old.pdf");
    }

    #[test]
    fn test_mark_viewed_keeps_first_timestamp() {
        let (conn, pharmacy_id, code_id) = test_db();
        let id = add_document(&conn, pharmacy_id, code_id, "rx.pdf", 9_000, 100);

        mark_viewed(&conn, id, 150).expect("first view");
        mark_viewed(&conn, id, 999).expect("second view");

        let (doc, _) = fetch_scoped(&conn, id, pharmacy_id).expect("fetch");
        assert!(doc.is_viewed);
        assert_eq!(doc.viewed_at, Some(150));
    }

    #[test]
    fn test_delete_scoped() {
        let (conn, pharmacy_id, code_id) = test_db();
        let other = tenants::insert(
            &conn, "PH-OTHER", "Other", None, None, None, None, None, 0,
        )
        .expect("insert other pharmacy");
        let id = add_document(&conn, pharmacy_id, code_id, "rx.pdf", 9_000, 100);

        assert!(matches!(
            delete_scoped(&conn, id, other),
            Err(DbError::NotFound(_))
        ));
        delete_scoped(&conn, id, pharmacy_id).expect("delete");
        assert!(fetch_scoped(&conn, id, pharmacy_id).is_err());
    }

    #[test]
    fn test_purge_expired_boundary() {
        let (conn, pharmacy_id, code_id) = test_db();
        add_document(&conn, pharmacy_id, code_id, "a.pdf", 1_000, 100);
        add_document(&conn, pharmacy_id, code_id, "b.pdf", 2_000, 100);

        let purged = purge_expired(&conn, 1_000).expect("purge");
        assert_eq!(purged, 1, "delete_after == now is due");
        assert_eq!(list_for_tenant(&conn, pharmacy_id).expect("list").len(), 1);
    }
}
