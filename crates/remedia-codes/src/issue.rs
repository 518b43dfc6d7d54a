//! Code issuance and staff-facing listing.
//!
//! Codes are drawn from a CSPRNG over a 36-character alphabet. The 6-char
//! space is small enough that collisions with live codes happen; each draw
//! is offered to the UNIQUE index and redrawn on conflict, bounded so a
//! pathologically full table fails loudly instead of spinning.

use remedia_db::{queries, DbError};
use remedia_types::{PrincipalId, TenantId, TransferCode, SECS_PER_HOUR};
use rusqlite::Connection;

use crate::{CodeError, CodePolicy, Result};

/// Upper bound on collision redraws per issuance.
pub const MAX_DRAW_ATTEMPTS: u32 = 8;

/// Issue a new transfer code for a pharmacy.
///
/// `expiration_hours` overrides the policy default when given; the use
/// limit always comes from policy. Fails with [`CodeError::TenantDisabled`]
/// when the pharmacy is deactivated.
pub fn issue(
    conn: &Connection,
    policy: &CodePolicy,
    pharmacy_id: TenantId,
    issued_by: PrincipalId,
    expiration_hours: Option<u64>,
    now: u64,
) -> Result<TransferCode> {
    let pharmacy = queries::tenants::get(conn, pharmacy_id)?;
    if !pharmacy.is_active {
        return Err(CodeError::TenantDisabled);
    }

    let hours = expiration_hours.unwrap_or(policy.default_expiration_hours);
    let expires_at = now + hours * SECS_PER_HOUR;
    let max_uses = policy.default_max_uses;

    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        let code = remedia_crypto::codes::transfer_code();
        match queries::codes::insert(conn, &code, pharmacy_id, issued_by, expires_at, max_uses, now)
        {
            Ok(id) => {
                tracing::info!(pharmacy_id, expires_at, max_uses, "transfer code issued");
                return Ok(TransferCode {
                    id,
                    code,
                    is_active: true,
                    expires_at,
                    max_uses,
                    current_uses: 0,
                    pharmacy_id,
                    issued_by,
                    created_at: now,
                    last_used_at: None,
                });
            }
            Err(DbError::Duplicate(_)) => {
                tracing::debug!(attempt, "transfer code collision, redrawing");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(CodeError::CodeSpaceExhausted {
        attempts: MAX_DRAW_ATTEMPTS,
    })
}

/// List a pharmacy's currently usable codes, newest first.
pub fn list_active(
    conn: &Connection,
    pharmacy_id: TenantId,
    now: u64,
) -> Result<Vec<TransferCode>> {
    Ok(queries::codes::list_active(conn, pharmacy_id, now)?)
}
