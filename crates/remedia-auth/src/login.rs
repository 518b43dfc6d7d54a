//! Credential verification and scoping.

use remedia_crypto::password;
use remedia_db::{queries, DbError};
use remedia_types::{Principal, TenantId};
use rusqlite::Connection;

use crate::{AuthError, Result};

/// Verify a staff login.
///
/// Unknown email and wrong password both return
/// [`AuthError::InvalidCredentials`]; only a verified caller learns that
/// their account is disabled.
pub fn authenticate(conn: &Connection, email: &str, login_password: &str) -> Result<Principal> {
    let (principal, digest) = match queries::principals::get_by_email(conn, email) {
        Ok(pair) => pair,
        Err(DbError::NotFound(_)) => return Err(AuthError::InvalidCredentials),
        Err(e) => return Err(e.into()),
    };

    if !password::verify_password(login_password, &digest)? {
        return Err(AuthError::InvalidCredentials);
    }

    if !principal.is_active {
        return Err(AuthError::AccountDisabled);
    }

    tracing::debug!(principal_id = principal.id, "staff login verified");

    Ok(principal)
}

/// The single pharmacy a principal may touch. Every registry, code, and
/// vault call made on a principal's behalf is scoped by this id.
pub fn scope_of(principal: &Principal) -> TenantId {
    principal.pharmacy_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedia_db::queries::tenants;

    fn test_db() -> (Connection, TenantId) {
        let conn = remedia_db::open_memory().expect("open test db");
        let pharmacy_id = tenants::insert(
            &conn, "PH-TEST", "Test", None, None, None, None, None, 0,
        )
        .expect("insert pharmacy");
        (conn, pharmacy_id)
    }

    fn add_account(conn: &Connection, pharmacy_id: TenantId, email: &str, pw: &str) {
        let digest = password::hash_password(pw).expect("hash");
        queries::principals::insert(conn, email, &digest, None, pharmacy_id, 0)
            .expect("insert principal");
    }

    #[test]
    fn test_authenticate() {
        let (conn, pharmacy_id) = test_db();
        add_account(&conn, pharmacy_id, "claire@exemple.fr", "hunter2hunter2");

        let principal =
            authenticate(&conn, "claire@exemple.fr", "hunter2hunter2").expect("login");
        assert_eq!(principal.email, "claire@exemple.fr");
        assert_eq!(scope_of(&principal), pharmacy_id);
    }

    #[test]
    fn test_wrong_password_and_unknown_email_read_the_same() {
        let (conn, pharmacy_id) = test_db();
        add_account(&conn, pharmacy_id, "claire@exemple.fr", "hunter2hunter2");

        let wrong_pw = authenticate(&conn, "claire@exemple.fr", "nope");
        let unknown = authenticate(&conn, "absent@exemple.fr", "nope");

        assert!(matches!(wrong_pw, Err(AuthError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_disabled_account() {
        let (conn, pharmacy_id) = test_db();
        add_account(&conn, pharmacy_id, "claire@exemple.fr", "hunter2hunter2");
        conn.execute(
            "UPDATE principals SET is_active = 0 WHERE email = 'claire@exemple.fr'",
            [],
        )
        .expect("disable");

        // Right password: the caller earns the specific error.
        assert!(matches!(
            authenticate(&conn, "claire@exemple.fr", "hunter2hunter2"),
            Err(AuthError::AccountDisabled)
        ));
        // Wrong password on a disabled account stays collapsed.
        assert!(matches!(
            authenticate(&conn, "claire@exemple.fr", "nope"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
