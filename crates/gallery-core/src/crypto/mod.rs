//! Cryptographic primitives for sealed gallery fields.
//!
//! Field values (titles, link URLs, link passwords, labels) and image
//! payloads are sealed with AES-256-GCM under a key derived from a
//! deployment passphrase via PBKDF2-HMAC-SHA256.
//!
//! ## Security Model
//!
//! - AES-256-GCM for authenticated encryption (confidentiality + integrity)
//! - PBKDF2-HMAC-SHA256 with 100,000 iterations for key derivation
//! - Fresh random 96-bit nonce per encryption, carried in the envelope
//! - Key material zeroized from memory on drop
//!
//! ## Threat Model
//!
//! This design defends against:
//! - Reading field values or image bytes from a stolen library at rest
//! - Undetected tampering with sealed values (GCM tag verification)
//!
//! This design does NOT defend against:
//! - An attacker who knows the deployment passphrase (it is a shared
//!   obfuscation secret, not a per-user credential)
//! - Offline guessing of a weak passphrase (the salt is fixed)
//! - Traffic analysis of value lengths (envelope length tracks
//!   plaintext length)

pub mod envelope;
pub mod key;

pub use envelope::{DecryptOutcome, EnvelopeCodec, NONCE_SIZE, TAG_SIZE};
pub use key::{
    derive_default_key, derive_key, DerivedKey, DEFAULT_PASSPHRASE, DEFAULT_SALT, KEY_LENGTH,
    PBKDF2_ITERATIONS,
};
