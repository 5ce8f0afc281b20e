//! Voice-over mixing engine.
//!
//! Captures synthesized speech, duck-mixes it into a music track, renders
//! the result offline at a normalized sample rate and exports it as a
//! 16-bit PCM WAV resource. The [`engine::MixOrchestrator`] drives the whole
//! pipeline and always answers with a [`engine::MixResult`], falling back to
//! the original track whenever a stage fails.

pub mod audio;
pub mod catalog;
pub mod common;
pub mod configs;
pub mod engine;
pub mod voice;

pub use audio::AudioSampleBuffer;
pub use common::errors::{MixError, Result};
pub use configs::Config;
pub use engine::{MixOrchestrator, MixRequest, MixResult, MixStage, OutputHandle, ResourceStore};
pub use voice::{StyleProfile, VoiceCapture};
