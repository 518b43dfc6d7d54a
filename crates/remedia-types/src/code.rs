//! Transfer code structures.

use serde::{Deserialize, Serialize};

use crate::{CodeId, PrincipalId, TenantId};

/// A short-lived, limited-use credential that authorizes anonymous uploads
/// into one pharmacy's scope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransferCode {
    pub id: CodeId,
    /// 6-character uppercase-alphanumeric bearer code.
    pub code: String,
    pub is_active: bool,
    /// Absolute expiry, Unix seconds.
    pub expires_at: u64,
    pub max_uses: u32,
    pub current_uses: u32,
    pub pharmacy_id: TenantId,
    pub issued_by: PrincipalId,
    pub created_at: u64,
    pub last_used_at: Option<u64>,
}

impl TransferCode {
    /// Whether the code itself admits another use at `now`.
    ///
    /// This is the row-local check only; the tenant-active condition is
    /// evaluated where the pharmacy row is in reach. Consumption re-checks
    /// everything inside the storing transaction.
    pub fn usable_at(&self, now: u64) -> bool {
        self.is_active && now < self.expires_at && self.current_uses < self.max_uses
    }
}
