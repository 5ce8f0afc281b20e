//! PCM resampling with three quality modes for offline renders:
//!
//! | Type | Quality | CPU Cost |
//! |---|---|---|
//! | [`LinearResampler`] | Okay (fast path) | Very low |
//! | [`HermiteResampler`] | High (Catmull-Rom) | Low-medium |
//! | [`SincResampler`] | Highest (windowed sinc) | High |

pub mod hermite;
pub mod linear;
pub mod sinc;

pub use hermite::HermiteResampler;
pub use linear::LinearResampler;
pub use sinc::SincResampler;

use crate::configs::ResampleQuality;

/// Unified resampler enum. Choose the quality at construction time.
pub enum Resampler {
    Linear(LinearResampler),
    Hermite(HermiteResampler),
    Sinc(SincResampler),
}

impl Resampler {
    pub fn new(quality: ResampleQuality, source_rate: u32, target_rate: u32) -> Self {
        match quality {
            ResampleQuality::Linear => Self::Linear(LinearResampler::new(source_rate, target_rate)),
            ResampleQuality::Hermite => {
                Self::Hermite(HermiteResampler::new(source_rate, target_rate))
            }
            ResampleQuality::Sinc => Self::Sinc(SincResampler::new(source_rate, target_rate)),
        }
    }

    /// Returns `true` if no conversion is needed (source == target rate).
    pub fn is_passthrough(&self) -> bool {
        match self {
            Self::Linear(r) => r.is_passthrough(),
            Self::Hermite(r) => r.is_passthrough(),
            Self::Sinc(r) => r.is_passthrough(),
        }
    }

    /// Resample one channel to exactly `out_frames` frames.
    pub fn process(&self, input: &[f32], out_frames: usize) -> Vec<f32> {
        match self {
            Self::Linear(r) => r.process(input, out_frames),
            Self::Hermite(r) => r.process(input, out_frames),
            Self::Sinc(r) => r.process(input, out_frames),
        }
    }
}
