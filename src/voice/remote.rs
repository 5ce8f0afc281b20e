//! `RemoteSpeechSynthesizer`: speech from an HTTP text-to-speech endpoint.
//!
//! Text is split into requests of at most [`TTS_MAX_CHARS`] characters on
//! word boundaries. Each response is decoded, rendered to the sink's rate
//! and channel count, scaled by the voice volume and written in order.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{
    audio::{AudioDecoder, OfflineRenderer, constants::TTS_MAX_CHARS},
    common::{
        errors::{MixError, Result},
        types::AudioFormat,
    },
};

use super::{recorder::RecordingSink, style::VoiceParams, synth::SpeechSynthesizer};

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

pub struct RemoteSpeechSynthesizer {
    client: reqwest::Client,
    language: String,
    decoder: Arc<dyn AudioDecoder>,
    renderer: OfflineRenderer,
}

impl RemoteSpeechSynthesizer {
    pub fn new(
        client: reqwest::Client,
        language: impl Into<String>,
        decoder: Arc<dyn AudioDecoder>,
        renderer: OfflineRenderer,
    ) -> Self {
        Self {
            client,
            language: language.into(),
            decoder,
            renderer,
        }
    }

    pub fn request_url(&self, text: &str, rate: f32) -> String {
        format!(
            "{}?ie=UTF-8&client=tw-ob&tl={}&ttsspeed={:.2}&q={}",
            TTS_ENDPOINT,
            urlencoding::encode(&self.language),
            rate,
            urlencoding::encode(text)
        )
    }

    /// Greedy word-boundary split; a single overlong word is cut by characters.
    pub fn split_text(text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let mut word: String = word.to_string();
            while word.chars().count() > TTS_MAX_CHARS {
                let head: String = word.chars().take(TTS_MAX_CHARS).collect();
                word = word.chars().skip(TTS_MAX_CHARS).collect();
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                chunks.push(head);
            }
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > TTS_MAX_CHARS && !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }

    async fn fetch_chunk(&self, text: &str, rate: f32) -> Result<Bytes> {
        let response = self.client.get(self.request_url(text, rate)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MixError::Synthesis(format!(
                "speech endpoint responded with HTTP {}",
                status
            )));
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl SpeechSynthesizer for RemoteSpeechSynthesizer {
    fn name(&self) -> &str {
        "remote"
    }

    async fn speak(&self, text: &str, params: VoiceParams, sink: &RecordingSink) -> Result<()> {
        let format = sink.format();
        debug!(
            "Remote speech: rate {:.2}, pitch {:.2} (pitch is not supported by the endpoint)",
            params.rate, params.pitch
        );

        for chunk in Self::split_text(text) {
            let bytes = self.fetch_chunk(&chunk, params.rate).await?;
            let decoder = self.decoder.clone();
            let renderer = self.renderer;
            let volume = params.volume;

            let samples = tokio::task::spawn_blocking(move || -> Result<Vec<f32>> {
                let speech = decoder.decode(bytes, Some(AudioFormat::Mp3))?;
                let speech = renderer
                    .render(speech, format.sample_rate)?
                    .remap_channels(format.channels)?;
                Ok(speech.interleaved().map(|s| s * volume).collect())
            })
            .await??;

            sink.write(samples)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SymphoniaDecoder;

    fn synth() -> RemoteSpeechSynthesizer {
        RemoteSpeechSynthesizer::new(
            reqwest::Client::new(),
            "en",
            Arc::new(SymphoniaDecoder::new()),
            OfflineRenderer::default(),
        )
    }

    #[test]
    fn url_carries_language_speed_and_encoded_text() {
        let url = synth().request_url("drop the bass & go", 1.2);
        assert!(url.starts_with("https://translate.google.com/translate_tts?"));
        assert!(url.contains("tl=en"));
        assert!(url.contains("ttsspeed=1.20"));
        assert!(url.contains("q=drop%20the%20bass%20%26%20go"));
    }

    #[test]
    fn long_text_is_split_on_words() {
        let text = "beat ".repeat(100);
        let chunks = RemoteSpeechSynthesizer::split_text(&text);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= TTS_MAX_CHARS));
        assert_eq!(chunks.join(" "), text.trim_end());
    }

    #[test]
    fn blank_text_makes_no_requests() {
        assert!(RemoteSpeechSynthesizer::split_text("   ").is_empty());
    }
}
