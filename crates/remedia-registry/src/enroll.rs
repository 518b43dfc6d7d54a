//! Pharmacy enrollment.
//!
//! Enrollment creates the pharmacy row and its owner principal in one
//! transaction; a failure on either side leaves no orphan. The tenant
//! code is drawn from the CSPRNG and redrawn on collision, bounded like
//! transfer code issuance.

use remedia_db::{queries, DbError};
use remedia_types::{Pharmacy, Principal};
use rusqlite::Connection;

use crate::{RegistryError, Result};

/// Upper bound on tenant code redraws per enrollment.
pub const MAX_DRAW_ATTEMPTS: u32 = 8;

/// Minimum owner password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Enrollment request for a new pharmacy and its owner account.
#[derive(Clone, Debug)]
pub struct NewTenant {
    pub name: String,
    pub city: String,
    /// 4 to 10 digits.
    pub postal_code: String,
    /// 8 to 15 digits.
    pub phone: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub owner_full_name: Option<String>,
    pub owner_email: String,
    pub owner_password: String,
}

/// Enroll a pharmacy together with its owner principal.
///
/// Validates field shapes, rejects already-claimed contact points, then
/// inserts both rows atomically. Returns the new pharmacy and owner.
pub fn create_tenant(conn: &mut Connection, new: &NewTenant, now: u64) -> Result<(Pharmacy, Principal)> {
    validate(new)?;

    if let Some(email) = &new.contact_email {
        if queries::tenants::contact_email_in_use(conn, email)? {
            return Err(RegistryError::DuplicateContact("contact email".into()));
        }
    }
    if queries::tenants::phone_in_use(conn, &new.phone)? {
        return Err(RegistryError::DuplicateContact("phone number".into()));
    }
    if queries::principals::email_in_use(conn, &new.owner_email)? {
        return Err(RegistryError::DuplicateContact("owner email".into()));
    }

    let password_hash = remedia_crypto::password::hash_password(&new.owner_password)?;

    let tx = conn.transaction().map_err(DbError::Sqlite)?;

    let mut inserted = None;
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        let tenant_code = remedia_crypto::codes::tenant_code();
        match queries::tenants::insert(
            &tx,
            &tenant_code,
            &new.name,
            new.address.as_deref(),
            Some(&new.city),
            Some(&new.postal_code),
            Some(&new.phone),
            new.contact_email.as_deref(),
            now,
        ) {
            Ok(id) => {
                inserted = Some((id, tenant_code));
                break;
            }
            Err(DbError::Duplicate(_)) => {
                tracing::debug!(attempt, "tenant code collision, redrawing");
            }
            Err(e) => return Err(e.into()),
        }
    }
    let Some((pharmacy_id, tenant_code)) = inserted else {
        return Err(RegistryError::CodeSpaceExhausted {
            attempts: MAX_DRAW_ATTEMPTS,
        });
    };

    // The email could be claimed between the pre-check and here; the
    // UNIQUE index settles it and the transaction rolls the pharmacy back.
    let owner_id = queries::principals::insert(
        &tx,
        &new.owner_email,
        &password_hash,
        new.owner_full_name.as_deref(),
        pharmacy_id,
        now,
    )
    .map_err(|e| match e {
        DbError::Duplicate(_) => RegistryError::DuplicateContact("owner email".into()),
        other => RegistryError::Db(other),
    })?;

    tx.commit().map_err(DbError::Sqlite)?;

    tracing::info!(pharmacy_id, "pharmacy enrolled");

    let pharmacy = Pharmacy {
        id: pharmacy_id,
        tenant_code,
        name: new.name.clone(),
        address: new.address.clone(),
        city: Some(new.city.clone()),
        postal_code: Some(new.postal_code.clone()),
        phone: Some(new.phone.clone()),
        contact_email: new.contact_email.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    let owner = Principal {
        id: owner_id,
        email: new.owner_email.clone(),
        full_name: new.owner_full_name.clone(),
        is_active: true,
        pharmacy_id,
        created_at: now,
        updated_at: now,
    };

    Ok((pharmacy, owner))
}

fn validate(new: &NewTenant) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(RegistryError::Validation("name must not be empty".into()));
    }
    if new.city.trim().is_empty() {
        return Err(RegistryError::Validation("city must not be empty".into()));
    }
    if !is_digits(&new.postal_code, 4, 10) {
        return Err(RegistryError::Validation(
            "postal code must be 4 to 10 digits".into(),
        ));
    }
    if !is_digits(&new.phone, 8, 15) {
        return Err(RegistryError::Validation(
            "phone must be 8 to 15 digits".into(),
        ));
    }
    if new.owner_email.trim().is_empty() {
        return Err(RegistryError::Validation(
            "owner email must not be empty".into(),
        ));
    }
    if new.owner_password.len() < MIN_PASSWORD_LEN {
        return Err(RegistryError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}
