//! Central constants for the mixing pipeline.
//!
//! All magic numbers in `src/audio/**` and `src/voice/**` live here so the
//! mixing policy stays in one place.

// ── Sample rates ─────────────────────────────────────────────────────────────

/// Rate every exported mix is rendered at unless configured otherwise (Hz).
pub const DEFAULT_TARGET_SAMPLE_RATE: u32 = 22_050;

/// Rate the voice recorder captures at unless configured otherwise (Hz).
pub const DEFAULT_CAPTURE_SAMPLE_RATE: u32 = 22_050;

/// Offline render bounds (Hz), matching what browser offline contexts accept.
pub const MIN_RENDER_SAMPLE_RATE: u32 = 3_000;
pub const MAX_RENDER_SAMPLE_RATE: u32 = 768_000;

// ── Mixing policy ─────────────────────────────────────────────────────────────

/// Attenuation applied to the base track under the overlay window.
pub const DUCK_FACTOR: f32 = 0.7;

/// Requested voice gains below this are raised to it.
pub const GAIN_FLOOR: f32 = 0.4;

/// Boost applied on top of the floored gain.
pub const GAIN_BOOST: f32 = 1.5;

/// Gains below this are logged as likely inaudible.
pub const LOW_GAIN_WARNING: f32 = 0.3;

/// Default overlay placement as a fraction of the base track length.
pub const DEFAULT_PLACEMENT: f32 = 0.3;

// ── Silence detection ────────────────────────────────────────────────────────

/// Absolute amplitude a sample must exceed to count as signal.
pub const SILENCE_THRESHOLD: f32 = 0.001;

/// Leading samples of channel 0 inspected for signal.
pub const SILENCE_WINDOW: usize = 100;

/// Signal samples required inside the leading window.
pub const MIN_SIGNAL_SAMPLES: usize = 1;

// ── WAV / i16 PCM ─────────────────────────────────────────────────────────────

pub const WAV_HEADER_LEN: usize = 44;
pub const WAV_FMT_CHUNK_LEN: u32 = 16;
pub const WAV_FORMAT_PCM: u16 = 1;
pub const WAV_BITS_PER_SAMPLE: u16 = 16;

pub const INT16_MAX_F: f32 = 32_767.0;

// ── Sinc resampler ────────────────────────────────────────────────────────────

/// Half-width of the windowed sinc kernel, in input frames.
pub const SINC_HALF_TAPS: usize = 16;

// ── Voice capture ─────────────────────────────────────────────────────────────

/// Channels the voice recorder captures.
pub const CAPTURE_CHANNELS: usize = 1;

/// Fundamental of the built-in tone voice at pitch 1.0 (Hz).
pub const TONE_BASE_HZ: f32 = 140.0;

/// Relative amplitudes of the tone voice harmonics.
pub const TONE_HARMONICS: [f32; 3] = [1.0, 0.5, 0.25];

/// Peak amplitude of the tone voice at volume 1.0.
pub const TONE_AMPLITUDE: f32 = 0.5;

/// Per-letter segment length at rate 1.0 (ms).
pub const TONE_LETTER_MS: f32 = 70.0;

/// Gap inserted for whitespace at rate 1.0 (ms).
pub const TONE_GAP_MS: f32 = 40.0;

/// Pause inserted for punctuation at rate 1.0 (ms).
pub const TONE_PAUSE_MS: f32 = 180.0;

/// Attack and release ramp of each voiced segment (ms).
pub const TONE_RAMP_MS: f32 = 2.0;

/// Longest text a single remote speech request may carry.
pub const TTS_MAX_CHARS: usize = 200;
