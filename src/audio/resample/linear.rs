//! `resample/linear.rs`: fast linear-interpolation resampler.

pub struct LinearResampler {
    /// Source / target ratio (< 1.0 upsamples, > 1.0 downsamples).
    ratio: f64,
}

impl LinearResampler {
    pub fn new(source_rate: u32, target_rate: u32) -> Self {
        Self {
            ratio: source_rate as f64 / target_rate as f64,
        }
    }

    /// Resample one whole channel to exactly `out_frames` frames.
    pub fn process(&self, input: &[f32], out_frames: usize) -> Vec<f32> {
        let Some(&last) = input.last() else {
            return vec![0.0; out_frames];
        };
        let n = input.len();

        (0..out_frames)
            .map(|j| {
                let pos = j as f64 * self.ratio;
                let idx = pos as usize;
                if idx + 1 >= n {
                    return last;
                }
                let fract = (pos - idx as f64) as f32;
                input[idx] * (1.0 - fract) + input[idx + 1] * fract
            })
            .collect()
    }

    pub fn is_passthrough(&self) -> bool {
        (self.ratio - 1.0).abs() < f64::EPSILON
    }
}
