use serde::{Deserialize, Serialize};

use crate::audio::constants::{DEFAULT_PLACEMENT, DEFAULT_TARGET_SAMPLE_RATE};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MixerConfig {
    /// Sample rate every exported mix is rendered at.
    #[serde(default = "default_target_sample_rate")]
    pub target_sample_rate: u32,
    /// Soft cap for a whole request; exceeding it degrades immediately.
    #[serde(default = "default_overall_budget_ms")]
    pub overall_budget_ms: u64,
    #[serde(default)]
    pub busy_policy: BusyPolicy,
    #[serde(default)]
    pub resample_quality: ResampleQuality,
    #[serde(default = "default_placement")]
    pub default_placement: f32,
}

/// What a second concurrent `produce_mix` call does while one is running.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Degrade immediately with a `Busy` reason.
    #[default]
    Reject,
    /// Wait for the running request to finish.
    Queue,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResampleQuality {
    Linear,
    #[default]
    Hermite,
    Sinc,
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: default_target_sample_rate(),
            overall_budget_ms: default_overall_budget_ms(),
            busy_policy: BusyPolicy::default(),
            resample_quality: ResampleQuality::default(),
            default_placement: default_placement(),
        }
    }
}

fn default_target_sample_rate() -> u32 {
    DEFAULT_TARGET_SAMPLE_RATE
}

fn default_overall_budget_ms() -> u64 {
    15_000
}

fn default_placement() -> f32 {
    DEFAULT_PLACEMENT
}
