use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{errors::Result, types::AudioFormat};

/// Raw encoded audio pulled from a music reference.
#[derive(Debug, Clone)]
pub struct FetchedAudio {
    pub bytes: Bytes,
    /// Container hint from the transport (content type, extension or mime).
    pub format: AudioFormat,
}

/// Capability every music source implements.
///
/// Each fetcher (HTTP, local file, resource store) claims the references it
/// understands through [`MusicFetcher::can_handle`].
#[async_trait]
pub trait MusicFetcher: Send + Sync {
    /// Unique identifier for this fetcher (e.g. "http", "file", "blob").
    fn name(&self) -> &str;

    /// Check if this fetcher can handle the given reference.
    fn can_handle(&self, source_ref: &str) -> bool;

    /// Load the whole encoded payload behind `source_ref`.
    async fn fetch(&self, source_ref: &str) -> Result<FetchedAudio>;
}
