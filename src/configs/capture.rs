use serde::{Deserialize, Serialize};

use crate::audio::constants::DEFAULT_CAPTURE_SAMPLE_RATE;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CaptureConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Hard cap on synthesis plus recorder tail.
    #[serde(default = "default_time_budget_ms")]
    pub time_budget_ms: u64,
    /// How long the recorder keeps running after synthesis reports completion.
    #[serde(default = "default_tail_ms")]
    pub tail_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            time_budget_ms: default_time_budget_ms(),
            tail_ms: default_tail_ms(),
        }
    }
}

fn default_sample_rate() -> u32 {
    DEFAULT_CAPTURE_SAMPLE_RATE
}

fn default_time_budget_ms() -> u64 {
    4_000
}

fn default_tail_ms() -> u64 {
    100
}
