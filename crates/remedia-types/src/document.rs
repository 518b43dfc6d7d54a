//! Document metadata structures.

use serde::{Deserialize, Serialize};

use crate::{CodeId, DocumentId, TenantId};

/// Metadata for an uploaded document.
///
/// The content itself rests only as AEAD ciphertext in the store and is
/// intentionally not part of this struct; listings must never carry it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Collision-avoided stored name: `{uploaded_at}_{original_name}`.
    pub stored_name: String,
    pub original_name: String,
    pub size_bytes: u64,
    /// Lowercased text after the final `.` of the original name.
    pub extension: String,
    /// MIME type as declared by the uploader; not verified.
    pub mime_type: String,
    pub is_viewed: bool,
    pub viewed_at: Option<u64>,
    /// Retention boundary: `uploaded_at + retention_days`, fixed at upload.
    pub delete_after: u64,
    pub uploaded_at: u64,
    pub pharmacy_id: TenantId,
    /// The transfer code that admitted this upload. The document outlives
    /// the code.
    pub code_id: CodeId,
}
