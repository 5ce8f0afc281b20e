//! Voice capture: runs a synthesizer into a recorder under a hard time
//! budget and hands back the encoded recording.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use tracing::{debug, warn};

use crate::{
    audio::constants::{CAPTURE_CHANNELS, MIN_SIGNAL_SAMPLES},
    common::errors::{MixError, Result},
    configs::CaptureConfig,
};

use super::{recorder::Recorder, style::StyleProfile, synth::SpeechSynthesizer};

/// Encoded speech ready for decoding.
#[derive(Debug, Clone)]
pub struct VoiceCapture {
    pub encoded_bytes: Bytes,
    pub mime_type: String,
    pub source_text: String,
    pub style: StyleProfile,
}

pub struct VoiceCaptureAdapter {
    synth: Arc<dyn SpeechSynthesizer>,
    recorder: Arc<dyn Recorder>,
    sample_rate: u32,
    tail: Duration,
}

impl VoiceCaptureAdapter {
    pub fn new(
        synth: Arc<dyn SpeechSynthesizer>,
        recorder: Arc<dyn Recorder>,
        config: &CaptureConfig,
    ) -> Self {
        Self {
            synth,
            recorder,
            sample_rate: config.sample_rate,
            tail: Duration::from_millis(config.tail_ms),
        }
    }

    /// Synthesize `text` with `style` and record it.
    ///
    /// The recorder session is opened before synthesis and released on every
    /// exit path, including this future being dropped.
    pub async fn capture(&self, text: &str, style: StyleProfile, budget_ms: u64) -> Result<VoiceCapture> {
        let session = self.recorder.start(self.sample_rate, CAPTURE_CHANNELS)?;
        let sink = session.sink();
        let params = style.voice_params();
        let tail_frames = (self.tail.as_secs_f64() * self.sample_rate as f64).round() as usize;
        debug!(
            "Capturing {} chars with {} voice via {} synthesizer",
            text.chars().count(),
            style,
            self.synth.name()
        );

        let run = async {
            self.synth.speak(text, params, &sink).await?;
            tokio::time::sleep(self.tail).await;
            sink.write_silence(tail_frames)
        };

        match tokio::time::timeout(Duration::from_millis(budget_ms), run).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("Voice capture exceeded {} ms", budget_ms);
                return Err(MixError::CaptureTimeout(budget_ms));
            }
        }
        drop(sink);

        let recording = session.finish()?;
        if recording.frame_count == 0 || recording.leading_signal_samples < MIN_SIGNAL_SAMPLES {
            return Err(MixError::CaptureEmpty);
        }
        debug!(
            "Captured {} frames ({} bytes, {})",
            recording.frame_count,
            recording.encoded_bytes.len(),
            recording.mime_type
        );

        Ok(VoiceCapture {
            encoded_bytes: recording.encoded_bytes,
            mime_type: recording.mime_type,
            source_text: text.to_string(),
            style,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::voice::{
        recorder::{RecordingSink, WavRecorder},
        style::VoiceParams,
        synth::ToneSynthesizer,
    };

    struct Stalled;

    #[async_trait]
    impl SpeechSynthesizer for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn speak(&self, _: &str, _: VoiceParams, _: &RecordingSink) -> Result<()> {
            std::future::pending().await
        }
    }

    fn adapter(synth: Arc<dyn SpeechSynthesizer>, recorder: &WavRecorder) -> VoiceCaptureAdapter {
        let config = CaptureConfig {
            tail_ms: 10,
            ..CaptureConfig::default()
        };
        VoiceCaptureAdapter::new(synth, Arc::new(recorder.clone()), &config)
    }

    #[tokio::test]
    async fn captures_wav_speech() {
        let recorder = WavRecorder::new();
        let capture = adapter(Arc::new(ToneSynthesizer::new()), &recorder)
            .capture("hello", StyleProfile::Radio, 4_000)
            .await
            .unwrap();

        assert_eq!(capture.mime_type, "audio/wav");
        assert_eq!(&capture.encoded_bytes[..4], b"RIFF");
        assert_eq!(capture.source_text, "hello");
        assert_eq!(capture.style, StyleProfile::Radio);
        assert_eq!(recorder.active_sessions(), 0);
    }

    #[tokio::test]
    async fn stalled_synthesis_times_out_and_releases_recorder() {
        let recorder = WavRecorder::new();
        let err = adapter(Arc::new(Stalled), &recorder)
            .capture("hello", StyleProfile::Dj, 50)
            .await
            .unwrap_err();

        assert!(matches!(err, MixError::CaptureTimeout(50)));
        assert_eq!(recorder.active_sessions(), 0);
    }

    #[tokio::test]
    async fn nothing_spoken_is_empty() {
        let recorder = WavRecorder::new();
        let err = adapter(Arc::new(ToneSynthesizer::new()), &recorder)
            .capture("   ", StyleProfile::Dj, 1_000)
            .await
            .unwrap_err();

        assert!(matches!(err, MixError::CaptureEmpty));
        assert_eq!(recorder.active_sessions(), 0);
    }
}
