//! Tenant code resolution and deactivation.

use remedia_db::{queries, DbError};
use remedia_types::{Pharmacy, TenantId};
use rusqlite::Connection;

use crate::{RegistryError, Result};

/// Resolve a tenant code to its pharmacy.
///
/// Presentation is forgiving: surrounding whitespace is trimmed and the
/// code is uppercased before lookup, since it travels by hand (printed
/// sheets, dictation). A disabled pharmacy resolves to
/// [`RegistryError::TenantDisabled`], not to a row.
pub fn resolve_by_code(conn: &Connection, tenant_code: &str) -> Result<Pharmacy> {
    let normalized = tenant_code.trim().to_uppercase();

    let pharmacy = match queries::tenants::get_by_code(conn, &normalized) {
        Ok(p) => p,
        Err(DbError::NotFound(_)) => return Err(RegistryError::TenantNotFound),
        Err(e) => return Err(e.into()),
    };

    if !pharmacy.is_active {
        return Err(RegistryError::TenantDisabled);
    }

    Ok(pharmacy)
}

/// Disable a pharmacy.
///
/// The row stays; its codes stop admitting uploads, new issuance is
/// refused, and staff signup against its tenant code is rejected.
pub fn deactivate(conn: &Connection, id: TenantId, now: u64) -> Result<()> {
    match queries::tenants::deactivate(conn, id, now) {
        Ok(()) => {
            tracing::info!(pharmacy_id = id, "pharmacy deactivated");
            Ok(())
        }
        Err(DbError::NotFound(_)) => Err(RegistryError::TenantNotFound),
        Err(e) => Err(e.into()),
    }
}
