//! `MixOrchestrator`: sequences capture, decode, mix, render and encode for
//! one request and folds every failure into a degraded [`MixResult`].
//!
//! ```text
//!  fetch music ─► decode music ─┐
//!                               ├─► mix ─► render ─► encode ─► register blob
//!  capture voice ─► decode voice┘
//! ```

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use bytes::Bytes;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::{
    audio::{
        AudioDecoder, AudioSampleBuffer, Mixer, MusicFetcher, OfflineRenderer, SourceRouter,
        SymphoniaDecoder, WavEncoder, codec::WAV_MIME_TYPE, silence::is_silent,
        source::create_client,
    },
    common::{
        errors::{MixError, Result},
        types::AudioFormat,
    },
    configs::{BusyPolicy, Config, MixerConfig, SpeechProvider},
    voice::{
        Recorder, RemoteSpeechSynthesizer, SpeechSynthesizer, ToneSynthesizer, VoiceCaptureAdapter,
        WavRecorder,
    },
};

use super::{
    request::{MixRequest, MixResult},
    resources::ResourceStore,
    stage::{MixStage, StageTracker},
};

/// A stage error together with the stage it happened in.
#[derive(Debug)]
struct StageFailure {
    stage: MixStage,
    error: MixError,
}

trait AtStage<T> {
    fn at(self, stage: MixStage) -> std::result::Result<T, StageFailure>;
}

impl<T> AtStage<T> for Result<T> {
    fn at(self, stage: MixStage) -> std::result::Result<T, StageFailure> {
        self.map_err(|error| StageFailure { stage, error })
    }
}

/// Run CPU-bound work off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

pub struct MixOrchestrator {
    fetcher: Arc<dyn MusicFetcher>,
    decoder: Arc<dyn AudioDecoder>,
    capture: VoiceCaptureAdapter,
    mixer: Mixer,
    renderer: OfflineRenderer,
    store: ResourceStore,
    config: MixerConfig,
    capture_budget_ms: u64,
    gate: Mutex<()>,
}

impl MixOrchestrator {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn MusicFetcher>,
        decoder: Arc<dyn AudioDecoder>,
        synth: Arc<dyn SpeechSynthesizer>,
        recorder: Arc<dyn Recorder>,
        store: ResourceStore,
    ) -> Self {
        Self {
            fetcher,
            decoder,
            capture: VoiceCaptureAdapter::new(synth, recorder, &config.capture),
            mixer: Mixer::new(),
            renderer: OfflineRenderer::new(config.mixer.resample_quality),
            store,
            config: config.mixer.clone(),
            capture_budget_ms: config.capture.time_budget_ms,
            gate: Mutex::new(()),
        }
    }

    /// Orchestrator with the built-in fetchers, decoder, recorder and the
    /// configured speech provider.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = ResourceStore::new();
        let decoder: Arc<dyn AudioDecoder> = Arc::new(SymphoniaDecoder::new());
        let fetcher = Arc::new(SourceRouter::new(&config.fetch, store.clone())?);
        let synth: Arc<dyn SpeechSynthesizer> = match config.tts.provider {
            SpeechProvider::Tone => Arc::new(ToneSynthesizer::new()),
            SpeechProvider::Remote => Arc::new(RemoteSpeechSynthesizer::new(
                create_client(&config.fetch)?,
                config.tts.language.clone(),
                decoder.clone(),
                OfflineRenderer::new(config.mixer.resample_quality),
            )),
        };
        info!("Speech provider: {}", synth.name());

        Ok(Self::new(
            config,
            fetcher,
            decoder,
            synth,
            Arc::new(WavRecorder::new()),
            store,
        ))
    }

    /// Registry holding finished mixes. Callers release handles here.
    pub fn resources(&self) -> &ResourceStore {
        &self.store
    }

    /// Request preset with the configured default placement.
    pub fn request(&self, music_source_ref: &str, voice_text: &str) -> MixRequest {
        MixRequest::new(music_source_ref, voice_text).with_placement(self.config.default_placement)
    }

    pub async fn produce_mix(&self, request: MixRequest) -> MixResult {
        self.produce_mix_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Never fails: any stage error yields a degraded result that points
    /// back at the original music.
    pub async fn produce_mix_with_cancel(
        &self,
        request: MixRequest,
        cancel: CancellationToken,
    ) -> MixResult {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let span = info_span!("mix", id = %&id[..8]);

        async move {
            let _permit = match self.config.busy_policy {
                BusyPolicy::Reject => match self.gate.try_lock() {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!("Rejecting mix: another request is running");
                        return MixResult::degraded(
                            request.music_source_ref(),
                            MixStage::Idle,
                            &MixError::Busy,
                        );
                    }
                },
                BusyPolicy::Queue => self.gate.lock().await,
            };

            let tracker = StageTracker::new();
            let music_secs = OnceLock::new();
            let budget_ms = self.config.overall_budget_ms;
            let run = self.run(&request, &tracker, &cancel, &music_secs);
            let outcome = match tokio::time::timeout(Duration::from_millis(budget_ms), run).await {
                Ok(outcome) => outcome,
                Err(_) => Err(StageFailure {
                    stage: tracker.current(),
                    error: MixError::Timeout(budget_ms),
                }),
            };

            match outcome {
                Ok(result) => {
                    tracker.advance(MixStage::Done);
                    info!(
                        "Mix ready: {} ({:.2}s)",
                        result.output_handle.as_str(),
                        result.duration_seconds
                    );
                    result
                }
                Err(StageFailure { stage, error }) => {
                    tracker.advance(MixStage::DegradedDone);
                    warn!(
                        "Mix degraded at {:?} ({}): {}; falling back to {}",
                        stage,
                        error.kind(),
                        error,
                        request.music_source_ref()
                    );
                    MixResult::degraded(request.music_source_ref(), stage, &error)
                        .with_music_duration(music_secs.get().copied())
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn decode(&self, bytes: Bytes, hint: AudioFormat) -> Result<AudioSampleBuffer> {
        let decoder = self.decoder.clone();
        let hint = hint.is_known().then_some(hint);
        blocking(move || decoder.decode(bytes, hint)).await
    }

    async fn run(
        &self,
        request: &MixRequest,
        tracker: &StageTracker,
        cancel: &CancellationToken,
        music_secs: &OnceLock<f64>,
    ) -> std::result::Result<MixResult, StageFailure> {
        request.validate().at(MixStage::Idle)?;
        tracker.advance(MixStage::CapturingVoice);

        let music = async {
            let fetched = self
                .fetcher
                .fetch(request.music_source_ref())
                .await
                .at(MixStage::DecodingSources)?;
            let music = self
                .decode(fetched.bytes, fetched.format)
                .await
                .at(MixStage::DecodingSources)?;
            debug!(
                "Music decoded: {} frames @ {} Hz, {} ch",
                music.frame_count(),
                music.sample_rate(),
                music.channel_count()
            );
            let _ = music_secs.set(music.duration_secs());
            Ok::<_, StageFailure>(music)
        };

        let voice = async {
            let capture = self
                .capture
                .capture(request.voice_text(), request.style(), self.capture_budget_ms)
                .await
                .at(MixStage::CapturingVoice)?;
            tracker.advance(MixStage::DecodingSources);

            let voice = self
                .decode(capture.encoded_bytes, AudioFormat::from_mime(&capture.mime_type))
                .await
                .at(MixStage::DecodingSources)?;
            if is_silent(&voice) {
                return Err(MixError::CaptureEmpty).at(MixStage::DecodingSources);
            }
            Ok::<_, StageFailure>(voice)
        };

        let (music, voice) = tokio::select! {
            biased;
            _ = cancel.cancelled(), if tracker.current().is_cancellable() => {
                return Err(MixError::Cancelled).at(tracker.current());
            }
            joined = async { tokio::try_join!(music, voice) } => joined?,
        };

        // Cancellation is no longer observed from here on.
        tracker.advance(MixStage::Mixing);
        let (mixer, renderer) = (self.mixer, self.renderer);
        let (placement, gain) = (request.placement(), request.voice_gain());
        let mixed = blocking(move || {
            let voice = if voice.sample_rate() != music.sample_rate() {
                renderer.render(voice, music.sample_rate())?
            } else {
                voice
            };
            mixer.mix(music, &voice, placement, gain)
        })
        .await
        .at(MixStage::Mixing)?;

        tracker.advance(MixStage::Rendering);
        let target_rate = self.config.target_sample_rate;
        let rendered = blocking(move || renderer.render(mixed, target_rate))
            .await
            .at(MixStage::Rendering)?;

        tracker.advance(MixStage::Encoding);
        let duration_seconds = rendered.duration_secs();
        let wav = blocking(move || WavEncoder::encode(&rendered))
            .await
            .at(MixStage::Encoding)?;

        let handle = self.store.register(wav, WAV_MIME_TYPE);
        Ok(MixResult::mixed(handle, duration_seconds))
    }
}
