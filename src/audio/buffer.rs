//! `AudioSampleBuffer`: planar `f32` PCM handed from stage to stage.

use crate::common::errors::{MixError, Result};

/// Planar floating-point PCM with a known sample rate.
///
/// Every channel holds the same number of frames. Samples are nominally in
/// `[-1.0, 1.0]` but may exceed that range until the WAV encoder clips them.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioSampleBuffer {
    pub fn from_channels(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(MixError::InvalidBuffer("sample rate must be non-zero".into()));
        }
        let Some(first) = channels.first() else {
            return Err(MixError::InvalidBuffer("at least one channel is required".into()));
        };
        let frames = first.len();
        if let Some((idx, ch)) = channels.iter().enumerate().find(|(_, c)| c.len() != frames) {
            return Err(MixError::InvalidBuffer(format!(
                "channel {} has {} frames, expected {}",
                idx,
                ch.len(),
                frames
            )));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Splits interleaved samples (`L, R, L, R, ...`) into channels.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(sample_rate: u32, channel_count: usize, samples: &[f32]) -> Result<Self> {
        if channel_count == 0 {
            return Err(MixError::InvalidBuffer("at least one channel is required".into()));
        }
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (ch, &s) in channels.iter_mut().zip(frame) {
                ch.push(s);
            }
        }
        Self::from_channels(sample_rate, channels)
    }

    pub fn silent(sample_rate: u32, channel_count: usize, frames: usize) -> Result<Self> {
        Self::from_channels(sample_rate, vec![vec![0.0; frames]; channel_count])
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    pub fn channel(&self, idx: usize) -> Option<&[f32]> {
        self.channels.get(idx).map(Vec::as_slice)
    }

    /// Channel `idx`, or the last channel when `idx` is past the end.
    ///
    /// This is how a buffer with fewer channels is spread over one with more.
    pub fn channel_or_last(&self, idx: usize) -> &[f32] {
        let last = self.channels.len() - 1;
        &self.channels[idx.min(last)]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Frame-major iterator over all samples.
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.frame_count()).flat_map(move |i| self.channels.iter().map(move |ch| ch[i]))
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|ch| ch.iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Re-lays the buffer out with `channel_count` channels.
    ///
    /// Extra target channels copy the last source channel; when narrowing,
    /// the surplus source channels are averaged into the last kept one.
    pub fn remap_channels(self, channel_count: usize) -> Result<Self> {
        if channel_count == 0 {
            return Err(MixError::InvalidBuffer("at least one channel is required".into()));
        }
        let current = self.channels.len();
        if current == channel_count {
            return Ok(self);
        }

        let sample_rate = self.sample_rate;
        let mut channels = self.channels;
        if current < channel_count {
            let last = channels[current - 1].clone();
            channels.resize(channel_count, last);
        } else {
            let folded: Vec<Vec<f32>> = channels.split_off(channel_count - 1);
            let n = folded.len() as f32;
            let frames = folded[0].len();
            let mut mix = vec![0.0f32; frames];
            for ch in &folded {
                for (m, &s) in mix.iter_mut().zip(ch) {
                    *m += s / n;
                }
            }
            channels.push(mix);
        }
        Self::from_channels(sample_rate, channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_channels() {
        let err = AudioSampleBuffer::from_channels(44_100, vec![vec![0.0; 4], vec![0.0; 3]])
            .unwrap_err();
        assert!(matches!(err, MixError::InvalidBuffer(_)));
    }

    #[test]
    fn rejects_zero_channels_and_rate() {
        assert!(AudioSampleBuffer::from_channels(44_100, vec![]).is_err());
        assert!(AudioSampleBuffer::silent(0, 1, 10).is_err());
    }

    #[test]
    fn interleaving_is_frame_major() {
        let buf =
            AudioSampleBuffer::from_interleaved(8_000, 2, &[0.1, -0.1, 0.2, -0.2, 0.3]).unwrap();
        assert_eq!(buf.frame_count(), 2);
        assert_eq!(buf.channel(0), Some(&[0.1, 0.2][..]));
        assert_eq!(buf.channel(1), Some(&[-0.1, -0.2][..]));
        let back: Vec<f32> = buf.interleaved().collect();
        assert_eq!(back, vec![0.1, -0.1, 0.2, -0.2]);
    }

    #[test]
    fn channel_or_last_reuses_mono() {
        let buf = AudioSampleBuffer::from_channels(8_000, vec![vec![0.5; 3]]).unwrap();
        assert_eq!(buf.channel_or_last(1), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn remap_widens_and_narrows() {
        let mono = AudioSampleBuffer::from_channels(8_000, vec![vec![0.25; 2]]).unwrap();
        let stereo = mono.remap_channels(2).unwrap();
        assert_eq!(stereo.channel_count(), 2);
        assert_eq!(stereo.channel(1), Some(&[0.25, 0.25][..]));

        let lr = AudioSampleBuffer::from_channels(8_000, vec![vec![1.0; 2], vec![0.0; 2]]).unwrap();
        let down = lr.remap_channels(1).unwrap();
        assert_eq!(down.channel(0), Some(&[0.5, 0.5][..]));
    }

    #[test]
    fn duration_follows_rate() {
        let buf = AudioSampleBuffer::silent(44_100, 2, 44_100 * 3).unwrap();
        assert!((buf.duration_secs() - 3.0).abs() < 1e-9);
    }
}
