//! # remedia-types
//!
//! Shared domain types for the Remedia workspace: pharmacies (tenants),
//! staff principals, transfer codes, and documents.
//!
//! All timestamps are Unix epoch seconds (u64). Row identities are the
//! store's integer primary keys.

pub mod code;
pub mod document;
pub mod tenant;

pub use code::TransferCode;
pub use document::Document;
pub use tenant::{Pharmacy, Principal};

/// Pharmacy (tenant) row id.
pub type TenantId = i64;
/// Staff principal row id.
pub type PrincipalId = i64;
/// Transfer code row id.
pub type CodeId = i64;
/// Document row id.
pub type DocumentId = i64;

/// Seconds per hour, for code expiry windows.
pub const SECS_PER_HOUR: u64 = 3_600;

/// Seconds per day, for document retention windows.
pub const SECS_PER_DAY: u64 = 86_400;
