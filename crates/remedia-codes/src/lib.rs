//! # remedia-codes
//!
//! Transfer code authority: issues short-lived bearer codes for a pharmacy,
//! answers whether a presented code admits an upload, and burns one use per
//! accepted document.
//!
//! ## Modules
//!
//! - [`policy`] — issuance defaults (expiration window, use limit)
//! - [`issue`] — code creation and staff-facing listing
//! - [`redeem`] — anonymous-side validation and use consumption

pub mod issue;
pub mod policy;
pub mod redeem;

pub use policy::CodePolicy;

/// Error types for code operations.
#[derive(Debug, thiserror::Error)]
pub enum CodeError {
    /// Collapsed rejection. Missing, expired, exhausted, deactivated, and
    /// tenant-disabled codes all land here so an anonymous caller cannot
    /// probe which condition failed.
    #[error("code invalid or expired")]
    CodeInvalid,

    /// The issuing pharmacy is disabled. Staff-facing only.
    #[error("pharmacy account is disabled")]
    TenantDisabled,

    /// Every draw attempt collided with a live code.
    #[error("could not draw an unused code after {attempts} attempts")]
    CodeSpaceExhausted {
        /// Number of draws tried.
        attempts: u32,
    },

    /// Database error.
    #[error("database error: {0}")]
    Db(#[from] remedia_db::DbError),
}

/// Convenience result type for code operations.
pub type Result<T> = std::result::Result<T, CodeError>;
