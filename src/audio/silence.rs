//! Leading-window signal probe used to reject silent voice captures.

use super::constants::{MIN_SIGNAL_SAMPLES, SILENCE_THRESHOLD, SILENCE_WINDOW};
use super::AudioSampleBuffer;

/// Counts samples in the first [`SILENCE_WINDOW`] of `samples` whose
/// magnitude exceeds [`SILENCE_THRESHOLD`].
pub fn leading_signal_count(samples: &[f32]) -> usize {
    samples
        .iter()
        .take(SILENCE_WINDOW)
        .filter(|s| s.abs() > SILENCE_THRESHOLD)
        .count()
}

/// `true` when channel 0 carries fewer than [`MIN_SIGNAL_SAMPLES`] signal
/// samples in its leading window. Zero-length buffers are silent.
pub fn is_silent(buffer: &AudioSampleBuffer) -> bool {
    buffer
        .channel(0)
        .map_or(true, |ch| leading_signal_count(ch) < MIN_SIGNAL_SAMPLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_leading_window_is_silent() {
        let mut ch = vec![0.001f32; 100];
        ch.extend(std::iter::repeat(0.8).take(1000));
        let buf = AudioSampleBuffer::from_channels(22_050, vec![ch]).unwrap();
        assert!(is_silent(&buf));
    }

    #[test]
    fn one_loud_sample_is_enough() {
        let mut ch = vec![0.0f32; 100];
        ch[99] = -0.002;
        let buf = AudioSampleBuffer::from_channels(22_050, vec![ch]).unwrap();
        assert!(!is_silent(&buf));
        assert_eq!(leading_signal_count(buf.channel(0).unwrap()), 1);
    }

    #[test]
    fn empty_buffer_is_silent() {
        let buf = AudioSampleBuffer::silent(22_050, 1, 0).unwrap();
        assert!(is_silent(&buf));
    }
}
