//! Staff account creation via tenant code.
//!
//! A new staff member joins by presenting their pharmacy's tenant code;
//! the code is resolved through the registry, so presentation is
//! normalized and disabled pharmacies are refused there.

use remedia_crypto::password;
use remedia_db::{queries, DbError};
use remedia_registry::{resolve, RegistryError};
use remedia_types::Principal;
use rusqlite::Connection;

use crate::{AuthError, Result};

/// Minimum signup password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Signup request for a staff account.
#[derive(Clone, Debug)]
pub struct NewPrincipal {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    /// The pharmacy's `PH-` tenant code, as presented.
    pub tenant_code: String,
}

/// Create a staff account bound to the pharmacy behind `tenant_code`.
pub fn register(conn: &Connection, new: &NewPrincipal, now: u64) -> Result<Principal> {
    if new.email.trim().is_empty() {
        return Err(AuthError::Validation("email must not be empty".into()));
    }
    if new.password.len() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    if queries::principals::email_in_use(conn, &new.email)? {
        return Err(AuthError::EmailTaken);
    }

    let pharmacy = match resolve::resolve_by_code(conn, &new.tenant_code) {
        Ok(p) => p,
        Err(RegistryError::TenantNotFound) => return Err(AuthError::TenantNotFound),
        Err(RegistryError::TenantDisabled) => return Err(AuthError::TenantDisabled),
        Err(RegistryError::Db(e)) => return Err(AuthError::Db(e)),
        Err(e) => return Err(AuthError::Validation(e.to_string())),
    };

    let digest = password::hash_password(&new.password)?;

    let id = queries::principals::insert(
        conn,
        &new.email,
        &digest,
        new.full_name.as_deref(),
        pharmacy.id,
        now,
    )
    .map_err(|e| match e {
        DbError::Duplicate(_) => AuthError::EmailTaken,
        other => AuthError::Db(other),
    })?;

    tracing::info!(principal_id = id, pharmacy_id = pharmacy.id, "staff account created");

    Ok(Principal {
        id,
        email: new.email.clone(),
        full_name: new.full_name.clone(),
        is_active: true,
        pharmacy_id: pharmacy.id,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login;
    use remedia_registry::enroll::{create_tenant, NewTenant};
    use remedia_types::Pharmacy;

    fn enrolled(conn: &mut Connection) -> Pharmacy {
        let new = NewTenant {
            name: "Pharmacie des Halles".to_string(),
            city: "Tours".to_string(),
            postal_code: "37000".to_string(),
            phone: "0247123456".to_string(),
            address: None,
            contact_email: None,
            owner_full_name: None,
            owner_email: "halles@exemple.fr".to_string(),
            owner_password: "longenough".to_string(),
        };
        create_tenant(conn, &new, 500).expect("enroll").0
    }

    fn signup(pharmacy: &Pharmacy, email: &str) -> NewPrincipal {
        NewPrincipal {
            email: email.to_string(),
            password: "preparateur1".to_string(),
            full_name: Some("Jean Martin".to_string()),
            tenant_code: pharmacy.tenant_code.clone(),
        }
    }

    #[test]
    fn test_register_then_login() {
        let mut conn = remedia_db::open_memory().expect("open test db");
        let pharmacy = enrolled(&mut conn);

        let principal =
            register(&conn, &signup(&pharmacy, "jean@exemple.fr"), 1_000).expect("register");
        assert_eq!(principal.pharmacy_id, pharmacy.id);

        let logged_in =
            login::authenticate(&conn, "jean@exemple.fr", "preparateur1").expect("login");
        assert_eq!(logged_in.id, principal.id);
    }

    #[test]
    fn test_register_normalizes_tenant_code() {
        let mut conn = remedia_db::open_memory().expect("open test db");
        let pharmacy = enrolled(&mut conn);

        let mut new = signup(&pharmacy, "jean@exemple.fr");
        new.tenant_code = format!(" {} ", pharmacy.tenant_code.to_lowercase());
        let principal = register(&conn, &new, 1_000).expect("register");
        assert_eq!(principal.pharmacy_id, pharmacy.id);
    }

    #[test]
    fn test_register_unknown_code() {
        let conn = remedia_db::open_memory().expect("open test db");
        let new = NewPrincipal {
            email: "jean@exemple.fr".to_string(),
            password: "preparateur1".to_string(),
            full_name: None,
            tenant_code: "PH-AAAAAAAAAAAAAAAA".to_string(),
        };
        assert!(matches!(
            register(&conn, &new, 1_000),
            Err(AuthError::TenantNotFound)
        ));
    }

    #[test]
    fn test_register_disabled_pharmacy() {
        let mut conn = remedia_db::open_memory().expect("open test db");
        let pharmacy = enrolled(&mut conn);
        resolve::deactivate(&conn, pharmacy.id, 900).expect("deactivate");

        assert!(matches!(
            register(&conn, &signup(&pharmacy, "jean@exemple.fr"), 1_000),
            Err(AuthError::TenantDisabled)
        ));
    }

    #[test]
    fn test_register_taken_email() {
        let mut conn = remedia_db::open_memory().expect("open test db");
        let pharmacy = enrolled(&mut conn);

        // The enrollment owner already holds this email.
        assert!(matches!(
            register(&conn, &signup(&pharmacy, "halles@exemple.fr"), 1_000),
            Err(AuthError::EmailTaken)
        ));
    }

    #[test]
    fn test_register_short_password() {
        let mut conn = remedia_db::open_memory().expect("open test db");
        let pharmacy = enrolled(&mut conn);

        let mut new = signup(&pharmacy, "jean@exemple.fr");
        new.password = "court".to_string();
        assert!(matches!(
            register(&conn, &new, 1_000),
            Err(AuthError::Validation(_))
        ));
    }
}
