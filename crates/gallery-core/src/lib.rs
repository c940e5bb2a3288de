//! # Gallery Core
//!
//! Core library for Gallery - an encrypted personal media gallery with a
//! CLI front end.
//!
//! This crate provides the sealed-envelope codec, storage abstractions,
//! and the gallery service independent of any interface layer.
//!
//! ## Architecture
//!
//! - **crypto**: Key derivation and the envelope codec
//! - **cache**: Memoized decryption keyed by item id
//! - **fetch**: Byte sources and fetch-and-decrypt over HTTP
//! - **storage**: Object and metadata store traits plus the
//!   filesystem/SQLite engines
//! - **gallery**: The service tying codec, cache, and stores together

pub mod cache;
pub mod crypto;
pub mod error;
pub mod fetch;
pub mod gallery;
pub mod storage;

mod fs;

pub use cache::DecryptCache;
pub use crypto::{DecryptOutcome, EnvelopeCodec};
pub use error::{GalleryError, Result};
pub use gallery::{Gallery, LocalGallery};
pub use storage::{MetadataStore, ObjectStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
