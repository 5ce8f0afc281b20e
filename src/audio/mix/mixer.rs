//! `audio/mix/mixer.rs`: ducking overlay mixer.
//!
//! The base track is attenuated by [`DUCK_FACTOR`] while the overlay plays
//! and left untouched everywhere else. Nothing is clipped here; the WAV
//! encoder clamps on the way out.

use std::ops::Range;

use tracing::{debug, warn};

use crate::{
    audio::{
        AudioSampleBuffer,
        constants::{DUCK_FACTOR, GAIN_BOOST, GAIN_FLOOR, LOW_GAIN_WARNING},
    },
    common::errors::{MixError, Result},
};

/// Gain actually applied to the overlay for a requested `gain` ratio.
#[inline]
pub fn effective_gain(gain: f32) -> f32 {
    gain.max(GAIN_FLOOR) * GAIN_BOOST
}

/// Frames of the base track covered by the overlay.
pub fn overlay_window(base_frames: usize, overlay_frames: usize, placement: f32) -> Range<usize> {
    let start = ((base_frames as f64 * placement as f64).floor() as usize).min(base_frames);
    let len = overlay_frames.min(base_frames - start);
    start..start + len
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Mixer;

impl Mixer {
    pub fn new() -> Self {
        Self
    }

    /// Duck-mix `overlay` onto `base` starting at `placement` of its length.
    ///
    /// The result keeps `base`'s channel count and frame length. Overlay
    /// channel `c` is `min(c, overlay.channels - 1)`.
    pub fn mix(
        &self,
        mut base: AudioSampleBuffer,
        overlay: &AudioSampleBuffer,
        placement: f32,
        gain: f32,
    ) -> Result<AudioSampleBuffer> {
        if !(0.0..=1.0).contains(&placement) {
            return Err(MixError::InvalidParameter(format!(
                "placement {} is outside [0, 1]",
                placement
            )));
        }
        if !(gain > 0.0 && gain <= 1.0) {
            return Err(MixError::InvalidParameter(format!(
                "gain ratio {} is outside (0, 1]",
                gain
            )));
        }
        if base.sample_rate() != overlay.sample_rate() {
            return Err(MixError::InvalidParameter(format!(
                "sample rate mismatch: base {} Hz, overlay {} Hz",
                base.sample_rate(),
                overlay.sample_rate()
            )));
        }

        if gain < LOW_GAIN_WARNING {
            warn!(
                "Voice gain {:.2} is below {:.1}; voice may not be clearly audible",
                gain, LOW_GAIN_WARNING
            );
        }

        let window = overlay_window(base.frame_count(), overlay.frame_count(), placement);
        let applied = effective_gain(gain);
        debug!(
            "Mixing overlay into frames {}..{} (gain {:.2}, effective {:.2})",
            window.start, window.end, gain, applied
        );

        if window.is_empty() {
            return Ok(base);
        }

        for (c, out) in base.channels_mut().iter_mut().enumerate() {
            let voice = overlay.channel_or_last(c);
            for (dst, &v) in out[window.clone()].iter_mut().zip(voice) {
                *dst = *dst * DUCK_FACTOR + v * applied;
            }
        }

        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(rate: u32, channels: usize, frames: usize, value: f32) -> AudioSampleBuffer {
        AudioSampleBuffer::from_channels(rate, vec![vec![value; frames]; channels]).unwrap()
    }

    #[test]
    fn effective_gain_is_floored_and_boosted() {
        assert!((effective_gain(0.1) - 0.6).abs() < 1e-6);
        assert!((effective_gain(0.8) - 1.2).abs() < 1e-6);
        assert!((effective_gain(1.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn window_is_truncated_at_base_end() {
        assert_eq!(overlay_window(100, 50, 0.3), 30..80);
        assert_eq!(overlay_window(100, 500, 0.3), 30..100);
        assert_eq!(overlay_window(100, 50, 1.0), 100..100);
        assert_eq!(overlay_window(0, 50, 0.5), 0..0);
    }

    #[test]
    fn samples_outside_window_are_untouched() {
        let base = constant(8_000, 2, 100, 0.2);
        let overlay = constant(8_000, 2, 10, 0.5);
        let out = Mixer::new().mix(base, &overlay, 0.5, 1.0).unwrap();

        for ch in out.channels() {
            assert!(ch[..50].iter().all(|&s| s == 0.2));
            assert!(ch[60..].iter().all(|&s| s == 0.2));
            for &s in &ch[50..60] {
                assert!((s - (0.2 * 0.7 + 0.5 * 1.5)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn mono_overlay_is_duplicated_onto_stereo_base() {
        let base = constant(8_000, 2, 20, 0.0);
        let overlay = constant(8_000, 1, 20, 0.4);
        let out = Mixer::new().mix(base, &overlay, 0.0, 0.5).unwrap();
        assert_eq!(out.channel(0), out.channel(1));
        assert!((out.channel(1).unwrap()[0] - 0.4 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn surplus_overlay_channels_are_ignored() {
        let base = constant(8_000, 1, 10, 0.0);
        let overlay = AudioSampleBuffer::from_channels(8_000, vec![vec![0.2; 10], vec![0.9; 10]])
            .unwrap();
        let out = Mixer::new().mix(base, &overlay, 0.0, 1.0).unwrap();
        assert_eq!(out.channel_count(), 1);
        assert!((out.channel(0).unwrap()[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let base = constant(8_000, 1, 10, 0.0);
        let overlay = constant(8_000, 1, 10, 0.1);
        let m = Mixer::new();
        for (placement, gain) in [(-0.1, 0.5), (1.1, 0.5), (f32::NAN, 0.5), (0.3, 0.0), (0.3, 1.5), (0.3, f32::NAN)] {
            let err = m.mix(base.clone(), &overlay, placement, gain).unwrap_err();
            assert!(matches!(err, MixError::InvalidParameter(_)));
        }

        let other_rate = constant(16_000, 1, 10, 0.1);
        assert!(matches!(
            m.mix(base, &other_rate, 0.3, 0.5),
            Err(MixError::InvalidParameter(_))
        ));
    }

    #[test]
    fn tone_over_silence_scenario() {
        let rate = 44_100;
        let base = constant(rate, 2, 10 * rate as usize, 0.0);
        let tone = constant(rate, 2, 2 * rate as usize, 0.5);
        let out = Mixer::new().mix(base, &tone, 0.3, 0.8).unwrap();

        assert_eq!(out.frame_count(), 441_000);
        for ch in out.channels() {
            assert_eq!(ch[132_299], 0.0);
            assert!((ch[132_300] - 0.6).abs() < 1e-6);
            assert!((ch[220_499] - 0.6).abs() < 1e-6);
            assert_eq!(ch[220_500], 0.0);
        }
    }
}
