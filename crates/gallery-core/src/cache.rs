//! In-memory cache for decrypted item content.
//!
//! Image payloads are stored sealed and can be large; unsealing one
//! means an object read, a base64 pass, and an AEAD pass. The cache
//! keys decrypted results by item id so repeated page renders pay that
//! cost once. Concurrent requests for the same id are deduplicated: one
//! caller performs the work, the rest await and share the result. A
//! failed attempt leaves no entry behind, so the next caller retries.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::error::Result;

/// Cache of decrypted content keyed by item id.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Default)]
pub struct DecryptCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
}

impl DecryptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `id`, or run `decrypt` to produce it.
    ///
    /// The map lock is held only long enough to find or insert the
    /// entry's cell, never across the decrypt future. At most one
    /// decrypt for a given id runs at a time; concurrent callers await
    /// the in-flight attempt. On success every caller gets a clone of
    /// the same value and the entry stays cached. On failure the error
    /// propagates to the caller whose closure ran, the cell stays
    /// empty, and the next caller starts a fresh attempt.
    pub async fn get_or_decrypt<F, Fut>(&self, id: &str, decrypt: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(id.to_string()).or_default().clone()
        };

        let value = cell.get_or_try_init(decrypt).await?;
        Ok(value.clone())
    }

    /// True if a decrypted value is cached for `id`.
    ///
    /// An entry whose first attempt is still in flight does not count.
    pub async fn contains(&self, id: &str) -> bool {
        let entries = self.entries.lock().await;
        entries.get(id).map(|c| c.initialized()).unwrap_or(false)
    }

    /// Number of ids with a cached value.
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|c| c.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop the cached value for `id`, if any.
    ///
    /// Callers already awaiting an in-flight decrypt keep their handle
    /// and still receive its result; only future lookups see the entry
    /// gone.
    pub async fn invalidate(&self, id: &str) {
        let mut entries = self.entries.lock().await;
        entries.remove(id);
    }
}

impl std::fmt::Debug for DecryptCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptCache").finish_non_exhaustive()
    }
}
