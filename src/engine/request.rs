use serde::Serialize;

use crate::{
    audio::constants::DEFAULT_PLACEMENT,
    common::errors::{MixError, Result},
    voice::StyleProfile,
};

use super::stage::MixStage;

/// Default voice gain offered to users.
pub const DEFAULT_VOICE_GAIN: f32 = 0.8;

/// One remix job. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct MixRequest {
    music_source_ref: String,
    voice_text: String,
    style: StyleProfile,
    voice_gain: f32,
    placement: f32,
}

impl MixRequest {
    pub fn new(music_source_ref: impl Into<String>, voice_text: impl Into<String>) -> Self {
        Self {
            music_source_ref: music_source_ref.into(),
            voice_text: voice_text.into(),
            style: StyleProfile::default(),
            voice_gain: DEFAULT_VOICE_GAIN,
            placement: DEFAULT_PLACEMENT,
        }
    }

    pub fn with_style(mut self, style: StyleProfile) -> Self {
        self.style = style;
        self
    }

    pub fn with_voice_gain(mut self, gain: f32) -> Self {
        self.voice_gain = gain;
        self
    }

    pub fn with_placement(mut self, placement: f32) -> Self {
        self.placement = placement;
        self
    }

    pub fn music_source_ref(&self) -> &str {
        &self.music_source_ref
    }

    pub fn voice_text(&self) -> &str {
        &self.voice_text
    }

    pub fn style(&self) -> StyleProfile {
        self.style
    }

    pub fn voice_gain(&self) -> f32 {
        self.voice_gain
    }

    pub fn placement(&self) -> f32 {
        self.placement
    }

    pub fn validate(&self) -> Result<()> {
        if self.music_source_ref.trim().is_empty() {
            return Err(MixError::InvalidParameter("music source is empty".into()));
        }
        if self.voice_text.trim().is_empty() {
            return Err(MixError::InvalidParameter("voice text is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.voice_gain) {
            return Err(MixError::InvalidParameter(format!(
                "voice gain {} is outside [0, 1]",
                self.voice_gain
            )));
        }
        if !(0.0..=1.0).contains(&self.placement) {
            return Err(MixError::InvalidParameter(format!(
                "placement {} is outside [0, 1]",
                self.placement
            )));
        }
        Ok(())
    }
}

/// Where a finished request's audio can be played from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "ref", rename_all = "camelCase")]
pub enum OutputHandle {
    /// A `blob:` handle in the orchestrator's resource store.
    Resource(String),
    /// The untouched music reference.
    Original(String),
}

impl OutputHandle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Resource(h) | Self::Original(h) => h,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixResult {
    pub output_handle: OutputHandle,
    pub duration_seconds: f64,
    pub succeeded: bool,
    pub degraded: bool,
    pub reason: Option<String>,
    pub failed_stage: Option<MixStage>,
}

impl MixResult {
    pub fn mixed(handle: String, duration_seconds: f64) -> Self {
        Self {
            output_handle: OutputHandle::Resource(handle),
            duration_seconds,
            succeeded: true,
            degraded: false,
            reason: None,
            failed_stage: None,
        }
    }

    /// Fallback result pointing back at the original track.
    pub fn degraded(music_source_ref: &str, stage: MixStage, error: &MixError) -> Self {
        Self {
            output_handle: OutputHandle::Original(music_source_ref.to_string()),
            duration_seconds: 0.0,
            succeeded: false,
            degraded: true,
            reason: Some(format!("{}: {}", error.kind(), error)),
            failed_stage: Some(stage),
        }
    }

    /// Carries the decoded music length over to a degraded result.
    pub fn with_music_duration(mut self, seconds: Option<f64>) -> Self {
        if let Some(seconds) = seconds {
            self.duration_seconds = seconds;
        }
        self
    }
}
