//! Pharmacy (tenant) and staff principal structures.

use serde::{Deserialize, Serialize};

use crate::TenantId;

/// An onboarded pharmacy: the unit of data isolation.
///
/// The `tenant_code` is issued once at onboarding (`PH-` plus 16 random
/// uppercase-alphanumeric characters), is globally unique, and is never
/// reused — not even after deactivation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: TenantId,
    /// Human-shareable tenant code, immutable once issued.
    pub tenant_code: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub phone: Option<String>,
    pub contact_email: Option<String>,
    /// Deactivated pharmacies keep their rows but can no longer issue
    /// transfer codes or receive uploads.
    pub is_active: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

/// An authenticated staff identity, bound to exactly one pharmacy.
///
/// The password digest is an Argon2id PHC string and never leaves the
/// auth layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Principal {
    pub id: crate::PrincipalId,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub pharmacy_id: TenantId,
    pub created_at: u64,
    pub updated_at: u64,
}
