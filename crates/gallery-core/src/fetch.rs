//! Fetching sealed objects over HTTP.
//!
//! Remote galleries serve stored objects (raw envelope bytes) through
//! signed URLs. [`ByteSource`] abstracts the transport so tests and
//! alternative backends can stand in for a live server;
//! [`HttpByteSource`] is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::crypto::{DecryptOutcome, EnvelopeCodec};
use crate::error::{GalleryError, Result};

/// Connection establishment timeout for HTTP fetches.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Whole-request timeout for HTTP fetches.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of raw object bytes addressed by URL.
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Fetch the bytes at `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP(S) byte source backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpByteSource {
    client: reqwest::Client,
}

impl HttpByteSource {
    /// Build a source with the default timeouts.
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build a source with explicit connect and whole-request timeouts.
    pub fn with_timeouts(connect: Duration, request: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .build()
            .map_err(|e| GalleryError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ByteSource for HttpByteSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Fetch(format!(
                "HTTP status {status} from {url}"
            )));
        }

        let bytes = response.bytes().await.map_err(|e| classify(url, &e))?;
        Ok(bytes.to_vec())
    }
}

/// Map a transport error to a fetch error with a readable cause.
fn classify(url: &str, e: &reqwest::Error) -> GalleryError {
    if e.is_timeout() {
        GalleryError::Fetch(format!("request to {url} timed out"))
    } else if e.is_connect() {
        GalleryError::Fetch(format!("connection to {url} failed"))
    } else {
        GalleryError::Fetch(format!("request to {url} failed: {e}"))
    }
}

/// Fetch raw envelope bytes from `url` and unseal them.
///
/// Stored objects hold the envelope in raw form; re-encoding the fetched
/// bytes as base64 reconstructs the envelope string the codec expects.
/// The decrypt step is total, so bytes that were never sealed come back
/// as a passthrough of their base64 form.
pub async fn fetch_and_decrypt_outcome<S>(
    source: &S,
    codec: &EnvelopeCodec,
    url: &str,
) -> Result<DecryptOutcome>
where
    S: ByteSource + ?Sized,
{
    let bytes = source.fetch(url).await?;
    let envelope = STANDARD.encode(&bytes);
    Ok(codec.decrypt_outcome(&envelope))
}

/// Fetch and unseal, discarding the passthrough distinction.
pub async fn fetch_and_decrypt<S>(source: &S, codec: &EnvelopeCodec, url: &str) -> Result<String>
where
    S: ByteSource + ?Sized,
{
    Ok(fetch_and_decrypt_outcome(source, codec, url)
        .await?
        .into_string())
}
