//! CSPRNG code generation for transfer and tenant codes.
//!
//! Both code kinds are bearer credentials, so every character is drawn from
//! the OS CSPRNG — never from a seeded PRNG. Uniqueness is not guaranteed
//! here; callers insert against a unique constraint and redraw on collision.

use rand::Rng;

/// Length of a transfer code.
pub const TRANSFER_CODE_LEN: usize = 6;

/// Fixed prefix of a tenant code.
pub const TENANT_CODE_PREFIX: &str = "PH-";

/// Length of the random body following the tenant code prefix.
pub const TENANT_CODE_BODY_LEN: usize = 16;

/// Uppercase-alphanumeric alphabet (36 symbols).
const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draw `len` uniform characters from [`ALPHABET`].
fn random_body(len: usize) -> String {
    let mut rng = rand::rngs::OsRng;
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Draw a 6-character transfer code, e.g. `K3QZ7M`.
///
/// The code space is small (36^6), so collisions against live codes are
/// rare but real; issuance must retry on unique-constraint violation.
pub fn transfer_code() -> String {
    random_body(TRANSFER_CODE_LEN)
}

/// Draw a tenant code, e.g. `PH-2N4QX0GJ7VTBMK9D`.
///
/// 36^16 values; a collision retry loop is still required, it just never
/// triggers in practice.
pub fn tenant_code() -> String {
    format!("{TENANT_CODE_PREFIX}{}", random_body(TENANT_CODE_BODY_LEN))
}
