//! # remedia-crypto
//!
//! Cryptographic operations for the Remedia document exchange.
//!
//! ## Modules
//!
//! - [`content`] — ChaCha20-Poly1305 sealing of document content at rest
//! - [`password`] — Argon2id password hashing and verification
//! - [`codes`] — CSPRNG generation of transfer and tenant codes

pub mod codes;
pub mod content;
pub mod password;

pub use content::ContentKey;

/// Error types for cryptographic operations.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    AeadEncryption,

    /// AEAD decryption failed (authentication tag mismatch). Stored
    /// ciphertext was corrupted or tampered with.
    #[error("AEAD decryption failed")]
    AeadDecryption,

    /// The provisioned content key is malformed.
    #[error("invalid content key: {0}")]
    InvalidKey(String),

    /// Password hashing or verification failed.
    #[error("password hash error: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
