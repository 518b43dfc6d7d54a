//! ChaCha20-Poly1305 sealing of document content (RFC 8439).
//!
//! Every stored document is the output of [`seal`]; plaintext never rests.
//! A fresh random nonce is drawn per seal and prepended to the ciphertext,
//! so the stored blob is `nonce || ciphertext || tag` and self-contained.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{CryptoError, Result};

/// Key size for ChaCha20-Poly1305 (256 bits = 32 bytes).
pub const KEY_SIZE: usize = 32;

/// Nonce size for ChaCha20-Poly1305 (96 bits = 12 bytes).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits = 16 bytes).
pub const TAG_SIZE: usize = 16;

/// The deployment-wide content encryption key.
///
/// Provisioned once at process start (base64 in the config or environment)
/// and shared immutably afterwards. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ContentKey([u8; KEY_SIZE]);

impl ContentKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Decode a base64 (standard alphabet) encoded 32-byte key.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = base64::Engine::decode(
            &base64::engine::general_purpose::STANDARD,
            encoded.trim(),
        )
        .map_err(|e| CryptoError::InvalidKey(format!("base64 decode error: {e}")))?;

        let key: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKey(format!("key must be {KEY_SIZE} bytes")))?;

        Ok(Self(key))
    }

    /// Draw a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut key);
        Self(key)
    }

    fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for ContentKey {
    // Never print key material.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ContentKey(..)")
    }
}

/// Encrypt document content for storage.
///
/// Returns `nonce || ciphertext || tag`; the nonce is random per call, so
/// sealing the same plaintext twice yields different blobs.
pub fn seal(key: &ContentKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut nonce);

    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::AeadEncryption)?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a stored blob produced by [`seal`].
///
/// Fails loudly with [`CryptoError::AeadDecryption`] if the blob is
/// truncated, corrupted, or was tampered with; altered plaintext is never
/// returned silently.
pub fn open(key: &ContentKey, sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::AeadDecryption);
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::AeadDecryption)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_roundtrip() {
        let key = ContentKey::generate();
        let plaintext = b"ordonnance du 12/03";

        let sealed = seal(&key, plaintext).expect("seal");
        let opened = open(&key, &sealed).expect("open");

        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_sealed_layout() {
        let key = ContentKey::generate();
        let sealed = seal(&key, b"test").expect("seal");
        assert_eq!(sealed.len(), NONCE_SIZE + 4 + TAG_SIZE);
    }

    #[test]
    fn test_nonce_is_fresh_per_seal() {
        let key = ContentKey::generate();
        let a = seal(&key, b"same input").expect("seal");
        let b = seal(&key, b"same input").expect("seal");
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let sealed = seal(&ContentKey::generate(), b"test").expect("seal");
        assert!(open(&ContentKey::generate(), &sealed).is_err());
    }

    #[test]
    fn test_any_flipped_byte_fails() {
        let key = ContentKey::generate();
        let sealed = seal(&key, b"x").expect("seal");

        for i in 0..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            assert!(
                open(&key, &tampered).is_err(),
                "flip at byte {i} must fail decryption"
            );
        }
    }

    #[test]
    fn test_truncated_blob_fails() {
        let key = ContentKey::generate();
        let sealed = seal(&key, b"test").expect("seal");
        assert!(open(&key, &sealed[..NONCE_SIZE + TAG_SIZE - 1]).is_err());
        assert!(open(&key, &[]).is_err());
    }

    #[test]
    fn test_empty_plaintext() {
        let key = ContentKey::generate();
        let sealed = seal(&key, b"").expect("seal");
        assert_eq!(sealed.len(), NONCE_SIZE + TAG_SIZE);
        assert!(open(&key, &sealed).expect("open").is_empty());
    }

    #[test]
    fn test_key_base64_roundtrip() {
        let encoded =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, [7u8; KEY_SIZE]);
        let key = ContentKey::from_base64(&encoded).expect("decode");

        let sealed = seal(&key, b"test").expect("seal");
        let same = ContentKey::from_bytes([7u8; KEY_SIZE]);
        assert_eq!(open(&same, &sealed).expect("open"), b"test");
    }

    #[test]
    fn test_short_key_rejected() {
        let encoded =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, [7u8; 16]);
        assert!(ContentKey::from_base64(&encoded).is_err());
        assert!(ContentKey::from_base64("not base64!!").is_err());
    }

    #[test]
    fn test_debug_does_not_leak() {
        let key = ContentKey::from_bytes([0xAB; KEY_SIZE]);
        assert_eq!(format!("{key:?}"), "ContentKey(..)");
    }
}
