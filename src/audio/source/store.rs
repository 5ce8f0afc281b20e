use async_trait::async_trait;

use crate::{
    common::{
        errors::{MixError, Result},
        types::AudioFormat,
    },
    engine::resources::{BLOB_SCHEME, ResourceStore},
};

use super::{FetchedAudio, MusicFetcher};

/// Resolves `blob:` handles previously registered in a [`ResourceStore`],
/// so a finished mix can itself be remixed.
pub struct StoreFetcher {
    store: ResourceStore,
}

impl StoreFetcher {
    pub fn new(store: ResourceStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MusicFetcher for StoreFetcher {
    fn name(&self) -> &str {
        "blob"
    }

    fn can_handle(&self, source_ref: &str) -> bool {
        source_ref.starts_with(BLOB_SCHEME)
    }

    async fn fetch(&self, source_ref: &str) -> Result<FetchedAudio> {
        let resource = self
            .store
            .get(source_ref)
            .ok_or_else(|| MixError::Fetch(format!("{} is not a live resource", source_ref)))?;

        Ok(FetchedAudio {
            format: AudioFormat::from_mime(&resource.mime_type),
            bytes: resource.bytes,
        })
    }
}
