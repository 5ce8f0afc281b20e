//! Speech synthesis capability and the built-in offline tone voice.

use async_trait::async_trait;
use tracing::debug;

use crate::{
    audio::constants::{
        TONE_AMPLITUDE, TONE_BASE_HZ, TONE_GAP_MS, TONE_HARMONICS, TONE_LETTER_MS, TONE_PAUSE_MS,
        TONE_RAMP_MS,
    },
    common::errors::Result,
};

use super::{recorder::RecordingSink, style::VoiceParams};

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &str;

    /// Speak `text` into `sink` at the sink's format. Returns once all
    /// speech has been written.
    async fn speak(&self, text: &str, params: VoiceParams, sink: &RecordingSink) -> Result<()>;
}

/// Deterministic synthesizer that needs no network or audio device.
///
/// Each letter or digit becomes a short harmonic tone whose fundamental
/// follows the voice pitch; whitespace and punctuation become gaps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneSynthesizer;

impl ToneSynthesizer {
    pub fn new() -> Self {
        Self
    }

    fn ms_to_frames(ms: f32, rate: f32, sample_rate: u32) -> usize {
        (ms / rate * sample_rate as f32 / 1000.0).round() as usize
    }

    /// Voice one character, continuing from `phase` (radians of the fundamental).
    fn voiced(c: char, params: VoiceParams, sample_rate: u32, frames: usize, phase: &mut f32) -> Vec<f32> {
        let step = (c.to_ascii_lowercase() as u32 % 7) as f32;
        let freq = TONE_BASE_HZ * params.pitch * (1.0 + step * 0.04);
        let omega = std::f32::consts::TAU * freq / sample_rate as f32;
        let ramp = Self::ms_to_frames(TONE_RAMP_MS, 1.0, sample_rate).max(1);
        let norm: f32 = TONE_HARMONICS.iter().sum();
        let amp = TONE_AMPLITUDE * params.volume / norm;
        let start = *phase;
        *phase = (start + omega * frames as f32) % std::f32::consts::TAU;

        (0..frames)
            .map(|i| {
                let env = (i.min(frames - 1 - i).min(ramp) as f32 / ramp as f32).max(0.05);
                let p = start + omega * i as f32;
                let s: f32 = TONE_HARMONICS
                    .iter()
                    .enumerate()
                    .map(|(h, a)| a * (p * (h + 1) as f32).sin())
                    .sum();
                s * amp * env
            })
            .collect()
    }
}

#[async_trait]
impl SpeechSynthesizer for ToneSynthesizer {
    fn name(&self) -> &str {
        "tone"
    }

    async fn speak(&self, text: &str, params: VoiceParams, sink: &RecordingSink) -> Result<()> {
        let text = text.trim_start_matches(|c: char| !c.is_alphanumeric());
        if text.is_empty() {
            debug!("Nothing to speak");
            return Ok(());
        }

        let format = sink.format();
        let letter = Self::ms_to_frames(TONE_LETTER_MS, params.rate, format.sample_rate).max(2);
        let gap = Self::ms_to_frames(TONE_GAP_MS, params.rate, format.sample_rate);
        let pause = Self::ms_to_frames(TONE_PAUSE_MS, params.rate, format.sample_rate);
        let mut phase = 0.0f32;

        for c in text.chars() {
            if c.is_alphanumeric() {
                let mono = Self::voiced(c, params, format.sample_rate, letter, &mut phase);
                let frames = mono
                    .iter()
                    .flat_map(|&s| std::iter::repeat_n(s, format.channels))
                    .collect();
                sink.write(frames)?;
            } else if c.is_whitespace() {
                sink.write_silence(gap)?;
                tokio::task::yield_now().await;
            } else if c.is_ascii_punctuation() {
                sink.write_silence(pause)?;
            }
        }

        Ok(())
    }
}
