//! Sealed-envelope encryption for gallery field values.
//!
//! An envelope is the base64 encoding of `nonce || ciphertext || tag`:
//!
//! ```text
//! base64( nonce[12] || AES-256-GCM ciphertext || tag[16] )
//! ```
//!
//! The nonce is freshly random per encryption, so sealing the same
//! plaintext twice yields different envelopes. Decryption is total by
//! contract: any input that is not a well-formed envelope under the
//! configured key is returned unchanged, so plaintext rows written
//! before encryption was introduced keep flowing through unharmed.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::crypto::key::{derive_default_key, derive_key, DerivedKey, DEFAULT_SALT};
use crate::error::{GalleryError, Result};

/// Nonce length in bytes. AES-GCM standard 96-bit nonce.
pub const NONCE_SIZE: usize = 12;

/// Authentication tag length in bytes appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

// 16 base64 chars decode to at most 12 raw bytes, which cannot hold the
// 28-byte nonce + tag minimum. Anything at or below this length is
// definitely not an envelope.
const MIN_PLAUSIBLE_LEN: usize = 16;

/// Result of a total decryption attempt.
///
/// `decrypt` never fails; this distinguishes a value that was actually
/// unsealed from one that passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptOutcome {
    /// The input was a valid envelope and was decrypted.
    Decrypted(String),
    /// The input was not a valid envelope and is returned as-is.
    Passthrough(String),
}

impl DecryptOutcome {
    /// True if the value was actually unsealed.
    pub fn was_decrypted(&self) -> bool {
        matches!(self, DecryptOutcome::Decrypted(_))
    }

    /// Consume the outcome, returning the contained string either way.
    pub fn into_string(self) -> String {
        match self {
            DecryptOutcome::Decrypted(s) | DecryptOutcome::Passthrough(s) => s,
        }
    }

    /// Borrow the contained string either way.
    pub fn as_str(&self) -> &str {
        match self {
            DecryptOutcome::Decrypted(s) | DecryptOutcome::Passthrough(s) => s,
        }
    }
}

/// Seals and unseals gallery field values under a derived key.
///
/// The codec is cheap to clone and safe to share across threads; each
/// operation builds its cipher from the key on demand.
#[derive(Clone)]
pub struct EnvelopeCodec {
    key: DerivedKey,
}

impl EnvelopeCodec {
    /// Create a codec from an already-derived key.
    pub fn new(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Create a codec using the built-in deployment passphrase and salt.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(derive_default_key()?))
    }

    /// Create a codec from a passphrase, using the deployment salt.
    pub fn from_passphrase(passphrase: &str) -> Result<Self> {
        Ok(Self::new(derive_key(passphrase, DEFAULT_SALT.as_bytes())?))
    }

    /// Seal a plaintext string into an envelope.
    ///
    /// A fresh random nonce is drawn for every call, so the output is
    /// nondeterministic even for identical inputs.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::CryptoUnavailable` if the cipher cannot be
    /// initialized or the encryption itself fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(self.key.as_bytes())
            .map_err(|e| GalleryError::CryptoUnavailable(format!("cipher init failed: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| GalleryError::CryptoUnavailable("encryption failed".to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(&sealed))
    }

    /// Unseal an envelope, or pass the input through unchanged.
    ///
    /// This never fails: malformed base64, truncated envelopes, wrong-key
    /// ciphertexts, and plain legacy values all come back verbatim.
    pub fn decrypt(&self, input: &str) -> String {
        self.decrypt_outcome(input).into_string()
    }

    /// Unseal an envelope, reporting whether decryption actually happened.
    pub fn decrypt_outcome(&self, input: &str) -> DecryptOutcome {
        if !is_base64_shaped(input) {
            return DecryptOutcome::Passthrough(input.to_string());
        }
        match self.try_unseal(input) {
            Ok(plaintext) => DecryptOutcome::Decrypted(plaintext),
            Err(_) => DecryptOutcome::Passthrough(input.to_string()),
        }
    }

    /// Heuristic: does this value look like a sealed envelope?
    ///
    /// True only when the string is strictly base64-alphabet and long
    /// enough to plausibly hold a nonce and tag. Used by integrity
    /// checks to flag fields that appear to have been stored in plain
    /// text. A short plain word like "cat" is correctly rejected; a
    /// legitimate base64-looking plaintext longer than 16 chars is a
    /// false positive this heuristic accepts.
    pub fn looks_encrypted(value: &str) -> bool {
        value.len() > MIN_PLAUSIBLE_LEN && is_base64_shaped(value)
    }

    fn try_unseal(&self, input: &str) -> Result<String> {
        let raw = STANDARD
            .decode(input)
            .map_err(|e| GalleryError::MalformedEnvelope(format!("invalid base64: {e}")))?;

        if raw.len() <= NONCE_SIZE {
            return Err(GalleryError::MalformedEnvelope(
                "envelope too short".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(self.key.as_bytes())
            .map_err(|e| GalleryError::CryptoUnavailable(format!("cipher init failed: {e}")))?;

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| GalleryError::MalformedEnvelope("authentication failed".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| GalleryError::MalformedEnvelope("plaintext is not valid UTF-8".to_string()))
    }
}

impl std::fmt::Debug for EnvelopeCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeCodec").finish_non_exhaustive()
    }
}

/// True if the string is non-empty and contains only standard base64
/// alphabet characters (including padding).
fn is_base64_shaped(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/' | b'='))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> EnvelopeCodec {
        EnvelopeCodec::with_defaults().expect("default codec should build")
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        let sealed = codec.encrypt("hello world").unwrap();
        assert_ne!(sealed, "hello world");
        assert_eq!(codec.decrypt(&sealed), "hello world");
    }

    #[test]
    fn test_round_trip_empty_string() {
        let codec = codec();
        let sealed = codec.encrypt("").unwrap();
        // Empty plaintext still carries nonce + tag
        assert!(!sealed.is_empty());
        let outcome = codec.decrypt_outcome(&sealed);
        assert!(outcome.was_decrypted());
        assert_eq!(outcome.into_string(), "");
    }

    #[test]
    fn test_round_trip_unicode() {
        let codec = codec();
        let plaintext = "göäß 日本語 🎨";
        let sealed = codec.encrypt(plaintext).unwrap();
        assert_eq!(codec.decrypt(&sealed), plaintext);
    }

    #[test]
    fn test_nonce_makes_output_nondeterministic() {
        let codec = codec();
        let a = codec.encrypt("same input").unwrap();
        let b = codec.encrypt("same input").unwrap();
        assert_ne!(a, b);
        assert_eq!(codec.decrypt(&a), "same input");
        assert_eq!(codec.decrypt(&b), "same input");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let codec = codec();
        let input = "just a plain title, with punctuation!";
        let outcome = codec.decrypt_outcome(input);
        assert!(!outcome.was_decrypted());
        assert_eq!(outcome.into_string(), input);
    }

    #[test]
    fn test_empty_string_passes_through() {
        let codec = codec();
        let outcome = codec.decrypt_outcome("");
        assert!(!outcome.was_decrypted());
        assert_eq!(outcome.into_string(), "");
    }

    #[test]
    fn test_short_base64_passes_through() {
        let codec = codec();
        // Valid base64 but decodes to fewer bytes than nonce + tag
        let outcome = codec.decrypt_outcome("aGVsbG8=");
        assert!(!outcome.was_decrypted());
        assert_eq!(outcome.as_str(), "aGVsbG8=");
    }

    #[test]
    fn test_wrong_key_passes_through() {
        let sealed = codec().encrypt("secret").unwrap();
        let other = EnvelopeCodec::from_passphrase("some-other-passphrase").unwrap();
        let outcome = other.decrypt_outcome(&sealed);
        assert!(!outcome.was_decrypted());
        assert_eq!(outcome.as_str(), sealed);
    }

    #[test]
    fn test_tampered_envelope_passes_through() {
        let codec = codec();
        let sealed = codec.encrypt("secret").unwrap();
        let mut raw = STANDARD.decode(&sealed).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = STANDARD.encode(&raw);
        let outcome = codec.decrypt_outcome(&tampered);
        assert!(!outcome.was_decrypted());
        assert_eq!(outcome.as_str(), tampered);
    }

    #[test]
    fn test_whitespace_skips_decrypt_attempt() {
        let codec = codec();
        let input = "has spaces\nand newlines";
        assert_eq!(codec.decrypt(input), input);
    }

    #[test]
    fn test_looks_encrypted() {
        let codec = codec();
        let sealed = codec.encrypt("anything").unwrap();
        assert!(EnvelopeCodec::looks_encrypted(&sealed));

        assert!(!EnvelopeCodec::looks_encrypted(""));
        assert!(!EnvelopeCodec::looks_encrypted("cat"));
        assert!(!EnvelopeCodec::looks_encrypted("plain text title"));
        // 16 chars exactly is still below the plausible minimum
        assert!(!EnvelopeCodec::looks_encrypted("AAAAAAAAAAAAAAAA"));
        // 17 base64 chars clears the length bar
        assert!(EnvelopeCodec::looks_encrypted("AAAAAAAAAAAAAAAAA"));
    }

    #[test]
    fn test_envelope_layout() {
        let codec = codec();
        let sealed = codec.encrypt("layout probe").unwrap();
        let raw = STANDARD.decode(&sealed).unwrap();
        // nonce + tag overhead on top of the plaintext length
        assert_eq!(raw.len(), NONCE_SIZE + "layout probe".len() + TAG_SIZE);
    }
}
