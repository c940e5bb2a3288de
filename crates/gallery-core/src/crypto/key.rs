//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! This module derives the AES-256-GCM key from a passphrase and salt.
//! The parameters are a fixed protocol constant: envelopes written by any
//! conforming implementation must decrypt under a key derived with the
//! same passphrase, salt, iteration count, and hash.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{GalleryError, Result};

/// PBKDF2 iteration count. Protocol constant; changing it breaks
/// compatibility with every existing envelope.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Deployment passphrase used when no override is configured.
pub const DEFAULT_PASSPHRASE: &str = "gallery-secret";

/// Deployment salt. Fixed for the whole installation; envelopes carry no
/// per-record salt.
pub const DEFAULT_SALT: &str = "salt-gallery";

/// A symmetric key derived from a passphrase.
///
/// Key material is zeroized from memory when dropped, reducing the
/// window of exposure.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    /// The raw key bytes (zeroized on drop)
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Create a new DerivedKey from raw bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher setup.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the envelope key from a passphrase and salt.
///
/// Same passphrase + salt always produces the same key; the operation is
/// stateless and no key material is ever persisted. Every process (or
/// test) that derives with identical inputs can decrypt the others'
/// envelopes.
///
/// # Arguments
///
/// * `passphrase` - The deployment passphrase
/// * `salt` - The deployment salt
///
/// # Errors
///
/// Returns `GalleryError::InvalidInput` if the passphrase or salt is empty.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<DerivedKey> {
    if passphrase.is_empty() {
        return Err(GalleryError::InvalidInput(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    if salt.is_empty() {
        return Err(GalleryError::InvalidInput(
            "Salt cannot be empty".to_string(),
        ));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        salt,
        PBKDF2_ITERATIONS,
        &mut key_bytes,
    );

    Ok(DerivedKey::from_bytes(key_bytes))
}

/// Derive the key for the built-in deployment constants.
pub fn derive_default_key() -> Result<DerivedKey> {
    derive_key(DEFAULT_PASSPHRASE, DEFAULT_SALT.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let passphrase = "test-passphrase";
        let salt = b"test-salt";

        let key1 = derive_key(passphrase, salt).unwrap();
        let key2 = derive_key(passphrase, salt).unwrap();

        // Same passphrase + salt should produce identical keys
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let passphrase = "test-passphrase";

        let key1 = derive_key(passphrase, b"salt-one").unwrap();
        let key2 = derive_key(passphrase, b"salt-two").unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = b"fixed-salt";

        let key1 = derive_key("passphrase-one", salt).unwrap();
        let key2 = derive_key("passphrase-two", salt).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_rejected() {
        let result = derive_key("", b"some-salt");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Passphrase cannot be empty"));
    }

    #[test]
    fn test_empty_salt_rejected() {
        let result = derive_key("test-passphrase", b"");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Salt cannot be empty"));
    }

    #[test]
    fn test_key_length() {
        let key = derive_key("test-passphrase", b"test-salt").unwrap();
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_default_key_matches_explicit_constants() {
        let default_key = derive_default_key().unwrap();
        let explicit = derive_key(DEFAULT_PASSPHRASE, DEFAULT_SALT.as_bytes()).unwrap();
        assert_eq!(default_key.as_bytes(), explicit.as_bytes());
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let key = derive_key("test-passphrase", b"test-salt").unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-passphrase"));
    }
}
