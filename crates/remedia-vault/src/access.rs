//! Staff-side listing, download, and deletion.
//!
//! Every operation takes the caller's pharmacy id and stays inside it;
//! a document in another pharmacy's scope reads as absent.

use remedia_crypto::{content, ContentKey};
use remedia_db::{queries, DbError};
use remedia_types::{Document, DocumentId, TenantId};
use rusqlite::Connection;

use crate::{Result, VaultError};

/// List a pharmacy's documents, newest first. Metadata only; content
/// stays sealed until [`download`].
pub fn list_documents(conn: &Connection, pharmacy_id: TenantId) -> Result<Vec<Document>> {
    Ok(queries::documents::list_for_tenant(conn, pharmacy_id)?)
}

/// Fetch and unseal one document for a pharmacy.
///
/// The first successful download marks the document viewed; the mark is
/// not set when unsealing fails, so a key mixup does not spoil the
/// unread state.
pub fn download(
    conn: &Connection,
    key: &ContentKey,
    id: DocumentId,
    pharmacy_id: TenantId,
    now: u64,
) -> Result<(Document, Vec<u8>)> {
    let (mut document, ciphertext) = match queries::documents::fetch_scoped(conn, id, pharmacy_id)
    {
        Ok(pair) => pair,
        Err(DbError::NotFound(_)) => return Err(VaultError::NotFound),
        Err(e) => return Err(e.into()),
    };

    let plaintext = content::open(key, &ciphertext)?;

    queries::documents::mark_viewed(conn, id, now)?;
    if !document.is_viewed {
        document.is_viewed = true;
        document.viewed_at = Some(now);
    }

    tracing::debug!(pharmacy_id, document_id = id, "document downloaded");

    Ok((document, plaintext))
}

/// Delete one document from a pharmacy's scope.
pub fn delete(conn: &Connection, id: DocumentId, pharmacy_id: TenantId) -> Result<()> {
    match queries::documents::delete_scoped(conn, id, pharmacy_id) {
        Ok(()) => {
            tracing::info!(pharmacy_id, document_id = id, "document deleted");
            Ok(())
        }
        Err(DbError::NotFound(_)) => Err(VaultError::NotFound),
        Err(e) => Err(e.into()),
    }
}
