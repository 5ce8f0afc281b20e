//! `HttpFetcher`: downloads a whole music file over HTTP(S).

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::common::{
    errors::{MixError, Result},
    types::AudioFormat,
};

use super::{FetchedAudio, MusicFetcher};

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MusicFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    fn can_handle(&self, source_ref: &str) -> bool {
        let lower = source_ref.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    async fn fetch(&self, source_ref: &str) -> Result<FetchedAudio> {
        let response = self.client.get(source_ref).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MixError::Fetch(format!(
                "{} responded with HTTP {}",
                source_ref, status
            )));
        }

        let from_header = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(AudioFormat::from_mime)
            .unwrap_or(AudioFormat::Unknown);
        let format = if from_header.is_known() {
            from_header
        } else {
            AudioFormat::from_url(source_ref)
        };

        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {} ({:?})", bytes.len(), source_ref, format);

        Ok(FetchedAudio { bytes, format })
    }
}
