//! The anonymous upload pipeline.
//!
//! Order matters: the code is checked before any work is spent on the
//! payload, limits are enforced on the plaintext, and only then is the
//! content sealed. The final step runs in one immediate transaction that
//! both burns a code use and stores the document; if either side fails
//! the other is rolled back, so a stored document always accounts for a
//! consumed use and vice versa.

use remedia_codes::redeem;
use remedia_crypto::{content, ContentKey};
use remedia_db::{queries, DbError};
use remedia_types::{Document, SECS_PER_DAY};
use rusqlite::{Connection, TransactionBehavior};

use crate::{policy, Result, VaultError, VaultPolicy};

/// An anonymous upload: a transfer code and the payload it should admit.
#[derive(Clone, Debug)]
pub struct UploadRequest<'a> {
    /// The presented transfer code.
    pub code: &'a str,
    /// Client-supplied file name.
    pub file_name: &'a str,
    /// Client-declared MIME type. Recorded, not verified.
    pub mime_type: &'a str,
    /// The plaintext payload.
    pub content: &'a [u8],
}

/// Accept an anonymous upload into the pharmacy scoped by its code.
///
/// Returns the stored document's metadata. The plaintext never reaches
/// the store; it is sealed under `key` first.
pub fn upload(
    conn: &mut Connection,
    vault_policy: &VaultPolicy,
    key: &ContentKey,
    request: &UploadRequest<'_>,
    now: u64,
) -> Result<Document> {
    let admitted = redeem::validate(conn, request.code, now)?;

    let size = request.content.len() as u64;
    if size > vault_policy.max_file_size_bytes {
        return Err(VaultError::FileTooLarge {
            size,
            max: vault_policy.max_file_size_bytes,
        });
    }

    let extension = policy::extension_of(request.file_name);
    if !vault_policy.allows(&extension) {
        return Err(VaultError::UnsupportedType { extension });
    }

    let sealed = content::seal(key, request.content)?;

    let stored_name = format!("{now}_{}", request.file_name);
    let delete_after = now + vault_policy.retention_days * SECS_PER_DAY;

    // Immediate, so the write lock is held from the start; the consume
    // and the insert land together or not at all.
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DbError::Sqlite)?;

    redeem::consume(&tx, request.code, now)?;

    let id = queries::documents::insert(
        &tx,
        &stored_name,
        request.file_name,
        size,
        &extension,
        request.mime_type,
        &sealed,
        delete_after,
        admitted.pharmacy_id,
        admitted.id,
        now,
    )?;

    tx.commit().map_err(DbError::Sqlite)?;

    tracing::info!(
        pharmacy_id = admitted.pharmacy_id,
        document_id = id,
        size,
        %extension,
        "document accepted"
    );

    Ok(Document {
        id,
        stored_name,
        original_name: request.file_name.to_string(),
        size_bytes: size,
        extension,
        mime_type: request.mime_type.to_string(),
        is_viewed: false,
        viewed_at: None,
        delete_after,
        uploaded_at: now,
        pharmacy_id: admitted.pharmacy_id,
        code_id: admitted.id,
    })
}
