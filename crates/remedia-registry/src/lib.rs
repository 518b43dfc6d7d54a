//! # remedia-registry
//!
//! Tenant registry: enrolls pharmacies, assigns each its permanent
//! `PH-`-prefixed tenant code, resolves codes back to pharmacies during
//! staff signup, and handles deactivation.
//!
//! ## Modules
//!
//! - [`enroll`] — pharmacy enrollment with its owner account
//! - [`resolve`] — tenant code resolution and deactivation

pub mod enroll;
pub mod resolve;

pub use enroll::NewTenant;

/// Error types for registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A field failed shape validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A contact point is already claimed by another pharmacy or account.
    #[error("{0} already in use")]
    DuplicateContact(String),

    /// No pharmacy carries the presented tenant code.
    #[error("pharmacy code invalid")]
    TenantNotFound,

    /// The pharmacy exists but is disabled.
    #[error("pharmacy account is disabled")]
    TenantDisabled,

    /// Every tenant code draw collided with a live pharmacy.
    #[error("could not draw an unused tenant code after {attempts} attempts")]
    CodeSpaceExhausted {
        /// Number of draws tried.
        attempts: u32,
    },

    /// Crypto error (password hashing).
    #[error("crypto error: {0}")]
    Crypto(#[from] remedia_crypto::CryptoError),

    /// Database error.
    #[error("database error: {0}")]
    Db(#[from] remedia_db::DbError),
}

/// Convenience result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
