//! `resample/sinc.rs`: Blackman-windowed sinc resampler.
//!
//! Highest quality mode. When downsampling the kernel is stretched so its
//! cutoff sits at the target Nyquist frequency; weights are normalized so a
//! constant input stays constant.

use crate::audio::constants::SINC_HALF_TAPS;

pub struct SincResampler {
    ratio: f64,
    /// Kernel cutoff relative to the source Nyquist frequency.
    cutoff: f64,
    /// Half-width of the kernel in input frames.
    half_width: isize,
}

impl SincResampler {
    pub fn new(source_rate: u32, target_rate: u32) -> Self {
        let ratio = source_rate as f64 / target_rate as f64;
        let cutoff = if ratio > 1.0 { 1.0 / ratio } else { 1.0 };
        Self {
            ratio,
            cutoff,
            half_width: (SINC_HALF_TAPS as f64 / cutoff).ceil() as isize,
        }
    }

    fn sinc(x: f64) -> f64 {
        if x.abs() < 1e-9 {
            return 1.0;
        }
        let pi_x = std::f64::consts::PI * x;
        pi_x.sin() / pi_x
    }

    /// Blackman window over `x ∈ [-half, half]`.
    fn blackman(x: f64, half: f64) -> f64 {
        if x.abs() >= half {
            return 0.0;
        }
        let phase = std::f64::consts::PI * (x / half + 1.0);
        0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
    }

    /// Resample one whole channel to exactly `out_frames` frames.
    pub fn process(&self, input: &[f32], out_frames: usize) -> Vec<f32> {
        if input.is_empty() {
            return vec![0.0; out_frames];
        }
        let last = input.len() as isize - 1;
        let half = self.half_width as f64;

        (0..out_frames)
            .map(|j| {
                let pos = j as f64 * self.ratio;
                let center = pos.floor() as isize;
                let mut acc = 0.0f64;
                let mut weight_sum = 0.0f64;

                for k in (center - self.half_width + 1)..=(center + self.half_width) {
                    let offset = pos - k as f64;
                    let w = self.cutoff * Self::sinc(self.cutoff * offset) * Self::blackman(offset, half);
                    acc += input[k.clamp(0, last) as usize] as f64 * w;
                    weight_sum += w;
                }

                if weight_sum.abs() < 1e-12 {
                    0.0
                } else {
                    (acc / weight_sum) as f32
                }
            })
            .collect()
    }

    pub fn is_passthrough(&self) -> bool {
        (self.ratio - 1.0).abs() < f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_signal_keeps_unity_gain() {
        let r = SincResampler::new(44_100, 22_050);
        let out = r.process(&[0.5; 400], 200);
        assert!(out.iter().all(|s| (s - 0.5).abs() < 1e-4));
    }

    #[test]
    fn upsampled_tone_keeps_its_peak() {
        let input: Vec<f32> = (0..2_000)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 22_050.0).sin() * 0.5)
            .collect();
        let r = SincResampler::new(22_050, 44_100);
        let out = r.process(&input, 4_000);
        let peak = out[200..3_800].iter().fold(0.0f32, |a, s| a.max(s.abs()));
        assert!((peak - 0.5).abs() < 0.02, "peak {}", peak);
    }
}
