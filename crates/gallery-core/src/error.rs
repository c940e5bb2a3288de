//! Error types for gallery core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Core error type for gallery operations.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The cryptographic backend failed during encryption or key setup.
    ///
    /// Always surfaced to the caller: silently producing unencrypted
    /// output would be worse than failing.
    #[error("Cryptographic backend failure: {0}")]
    CryptoUnavailable(String),

    /// Input is not a well-formed envelope (bad base64, truncated, or
    /// failed authentication).
    ///
    /// This variant never escapes `EnvelopeCodec::decrypt`; it exists so
    /// the decode path can report *why* it fell back to passthrough.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Network or remote-read failure while fetching an encrypted payload.
    ///
    /// Propagated to the caller without retry.
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Storage backend error (filesystem or database).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint was violated (duplicate tag name,
    /// tag already attached).
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        GalleryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        GalleryError::InvalidInput(err.to_string())
    }
}

impl From<rusqlite::Error> for GalleryError {
    fn from(err: rusqlite::Error) -> Self {
        GalleryError::Storage(err.to_string())
    }
}
