use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    common::errors::{MixError, Result},
    configs::FetchConfig,
    engine::resources::ResourceStore,
};

use super::{FetchedAudio, FileFetcher, HttpFetcher, MusicFetcher, StoreFetcher, create_client};

pub type BoxedFetcher = Box<dyn MusicFetcher>;

/// Dispatches a music reference to the first fetcher that claims it.
pub struct SourceRouter {
    fetchers: Vec<BoxedFetcher>,
}

impl SourceRouter {
    /// Router with the built-in HTTP, file and resource-store fetchers.
    pub fn new(config: &FetchConfig, store: ResourceStore) -> Result<Self> {
        let client = create_client(config)?;
        let fetchers: Vec<BoxedFetcher> = vec![
            Box::new(StoreFetcher::new(store)),
            Box::new(HttpFetcher::new(client)),
            Box::new(FileFetcher::new(config.asset_root.clone())),
        ];
        for f in &fetchers {
            info!("Loaded music fetcher: {}", f.name());
        }
        Ok(Self { fetchers })
    }

    pub fn with_fetchers(fetchers: Vec<BoxedFetcher>) -> Self {
        Self { fetchers }
    }

    fn route(&self, source_ref: &str) -> Option<&dyn MusicFetcher> {
        self.fetchers
            .iter()
            .find(|f| f.can_handle(source_ref))
            .map(|f| f.as_ref())
    }
}

#[async_trait]
impl MusicFetcher for SourceRouter {
    fn name(&self) -> &str {
        "router"
    }

    fn can_handle(&self, source_ref: &str) -> bool {
        self.route(source_ref).is_some()
    }

    async fn fetch(&self, source_ref: &str) -> Result<FetchedAudio> {
        let fetcher = self
            .route(source_ref)
            .ok_or_else(|| MixError::Fetch(format!("no fetcher handles {}", source_ref)))?;
        debug!("Routing {} to {} fetcher", source_ref, fetcher.name());
        fetcher.fetch(source_ref).await
    }
}
