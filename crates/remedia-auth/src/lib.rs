//! # remedia-auth
//!
//! Access guard for pharmacy staff: password login, staff signup against
//! a pharmacy's tenant code, and the scope every later data access is
//! pinned to.
//!
//! ## Modules
//!
//! - [`login`] — credential verification and scoping
//! - [`signup`] — staff account creation via tenant code

pub mod login;
pub mod signup;

pub use signup::NewPrincipal;

/// Error types for access guard operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Collapsed login rejection. Unknown email and wrong password read
    /// the same, so login cannot be used to probe which emails exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Credentials are right but the account is disabled.
    #[error("account is disabled")]
    AccountDisabled,

    /// Signup email is already claimed.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// The presented tenant code matches no pharmacy.
    #[error("pharmacy code invalid")]
    TenantNotFound,

    /// The pharmacy behind the tenant code is disabled.
    #[error("pharmacy account is disabled")]
    TenantDisabled,

    /// A field failed shape validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Crypto error (password hashing/verification).
    #[error("crypto error: {0}")]
    Crypto(#[from] remedia_crypto::CryptoError),

    /// Database error.
    #[error("database error: {0}")]
    Db(#[from] remedia_db::DbError),
}

/// Convenience result type for access guard operations.
pub type Result<T> = std::result::Result<T, AuthError>;
