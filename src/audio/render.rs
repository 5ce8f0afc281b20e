//! Offline (non-realtime) render pass: converts a whole buffer to a target
//! sample rate in one go.

use tracing::debug;

use crate::{
    audio::{
        AudioSampleBuffer,
        constants::{MAX_RENDER_SAMPLE_RATE, MIN_RENDER_SAMPLE_RATE},
        resample::Resampler,
    },
    common::errors::{MixError, Result},
    configs::ResampleQuality,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRenderer {
    quality: ResampleQuality,
}

impl OfflineRenderer {
    pub fn new(quality: ResampleQuality) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> ResampleQuality {
        self.quality
    }

    /// Number of frames a buffer of `frames` at `source_rate` has at `target_rate`.
    pub fn output_frames(frames: usize, source_rate: u32, target_rate: u32) -> usize {
        let scaled = (frames as f64 * target_rate as f64 / source_rate as f64).round() as usize;
        scaled.max(1)
    }

    pub fn render(&self, buffer: AudioSampleBuffer, target_rate: u32) -> Result<AudioSampleBuffer> {
        if buffer.is_empty() {
            return Err(MixError::Render("cannot render a zero-length buffer".into()));
        }
        if !(MIN_RENDER_SAMPLE_RATE..=MAX_RENDER_SAMPLE_RATE).contains(&target_rate) {
            return Err(MixError::Render(format!(
                "target sample rate {} Hz is outside {}..={} Hz",
                target_rate, MIN_RENDER_SAMPLE_RATE, MAX_RENDER_SAMPLE_RATE
            )));
        }

        let source_rate = buffer.sample_rate();
        let resampler = Resampler::new(self.quality, source_rate, target_rate);
        if resampler.is_passthrough() {
            return Ok(buffer);
        }

        let out_frames = Self::output_frames(buffer.frame_count(), source_rate, target_rate);
        debug!(
            "Rendering {} frames @ {} Hz -> {} frames @ {} Hz ({:?})",
            buffer.frame_count(),
            source_rate,
            out_frames,
            target_rate,
            self.quality
        );

        let channels = buffer
            .channels()
            .iter()
            .map(|ch| resampler.process(ch, out_frames))
            .collect();

        AudioSampleBuffer::from_channels(target_rate, channels)
            .map_err(|e| MixError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(rate: u32, frames: usize) -> AudioSampleBuffer {
        let ch: Vec<f32> = (0..frames)
            .map(|i| (2.0 * std::f32::consts::PI * 220.0 * i as f32 / rate as f32).sin() * 0.5)
            .collect();
        AudioSampleBuffer::from_channels(rate, vec![ch.clone(), ch]).unwrap()
    }

    #[test]
    fn equal_rates_pass_through() {
        let input = tone(22_050, 500);
        let out = OfflineRenderer::default().render(input.clone(), 22_050).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn downsampling_halves_frame_count() {
        for quality in [ResampleQuality::Linear, ResampleQuality::Hermite, ResampleQuality::Sinc] {
            let out = OfflineRenderer::new(quality)
                .render(tone(44_100, 44_100), 22_050)
                .unwrap();
            assert_eq!(out.sample_rate(), 22_050);
            assert_eq!(out.frame_count(), 22_050);
            assert_eq!(out.channel_count(), 2);
        }
    }

    #[test]
    fn output_frames_round_and_never_drop_to_zero() {
        assert_eq!(OfflineRenderer::output_frames(3, 44_100, 22_050), 2);
        assert_eq!(OfflineRenderer::output_frames(1, 768_000, 3_000), 1);
    }

    #[test]
    fn zero_length_buffer_is_rejected() {
        let empty = AudioSampleBuffer::silent(44_100, 2, 0).unwrap();
        let err = OfflineRenderer::default().render(empty, 22_050).unwrap_err();
        assert!(matches!(err, MixError::Render(_)));
    }

    #[test]
    fn out_of_range_target_rate_is_rejected() {
        let r = OfflineRenderer::default();
        assert!(matches!(r.render(tone(44_100, 10), 2_999), Err(MixError::Render(_))));
        assert!(matches!(r.render(tone(44_100, 10), 768_001), Err(MixError::Render(_))));
    }
}
