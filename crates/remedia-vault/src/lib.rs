//! # remedia-vault
//!
//! Document vault: accepts code-gated anonymous uploads, seals content
//! under the vault key before it touches the store, serves staff-side
//! listings and decrypted downloads, and sweeps documents past their
//! retention boundary.
//!
//! ## Modules
//!
//! - [`policy`] — size/type/retention limits
//! - [`upload`] — the anonymous upload pipeline
//! - [`access`] — staff-side listing, download, deletion
//! - [`sweep`] — retention enforcement

pub mod access;
pub mod policy;
pub mod sweep;
pub mod upload;

pub use policy::VaultPolicy;
pub use upload::UploadRequest;

/// Error types for vault operations.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// Collapsed rejection of the presented transfer code.
    #[error("code invalid or expired")]
    CodeInvalid,

    /// Payload exceeds the size limit.
    #[error("file too large: {size} bytes exceeds limit of {max}")]
    FileTooLarge {
        /// Payload size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },

    /// Payload extension is not on the allowlist.
    #[error("file type {extension:?} not allowed")]
    UnsupportedType {
        /// The rejected extension, lowercased.
        extension: String,
    },

    /// No such document in the caller's scope.
    #[error("document not found")]
    NotFound,

    /// Crypto error (seal/open).
    #[error("crypto error: {0}")]
    Crypto(#[from] remedia_crypto::CryptoError),

    /// Database error.
    #[error("database error: {0}")]
    Db(#[from] remedia_db::DbError),
}

impl From<remedia_codes::CodeError> for VaultError {
    fn from(e: remedia_codes::CodeError) -> Self {
        match e {
            remedia_codes::CodeError::Db(db) => VaultError::Db(db),
            // Anything else the code authority reports collapses to the
            // anonymous-side rejection.
            _ => VaultError::CodeInvalid,
        }
    }
}

/// Convenience result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
