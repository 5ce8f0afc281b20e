//! Recording capability: a session collects the PCM a synthesizer writes
//! into its [`RecordingSink`] and encodes it on [`RecordingSession::finish`].

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use bytes::Bytes;
use flume::{Receiver, Sender};
use tracing::debug;

use crate::{
    audio::{
        AudioSampleBuffer,
        codec::{WAV_MIME_TYPE, WavEncoder},
        silence::leading_signal_count,
    },
    common::errors::{MixError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkFormat {
    pub sample_rate: u32,
    pub channels: usize,
}

/// Write end of a recording session. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    tx: Sender<Vec<f32>>,
    format: SinkFormat,
}

impl RecordingSink {
    pub fn format(&self) -> SinkFormat {
        self.format
    }

    /// Append interleaved samples. `samples.len()` must be a whole number of frames.
    pub fn write(&self, samples: Vec<f32>) -> Result<()> {
        if samples.len() % self.format.channels != 0 {
            return Err(MixError::InvalidBuffer(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                self.format.channels
            )));
        }
        if samples.is_empty() {
            return Ok(());
        }
        self.tx
            .send(samples)
            .map_err(|_| MixError::Synthesis("recording session already stopped".into()))
    }

    pub fn write_silence(&self, frames: usize) -> Result<()> {
        self.write(vec![0.0; frames * self.format.channels])
    }
}

/// What a recorder reports when a session stops.
#[derive(Debug, Clone)]
pub struct Recording {
    pub encoded_bytes: Bytes,
    pub mime_type: String,
    pub frame_count: usize,
    /// Signal samples in the leading window of channel 0.
    pub leading_signal_samples: usize,
}

pub trait Recorder: Send + Sync {
    /// Open a session. At most one session is active per recorder.
    fn start(&self, sample_rate: u32, channels: usize) -> Result<Box<dyn RecordingSession>>;
}

/// Dropping a session without finishing it releases the recorder.
pub trait RecordingSession: Send {
    fn sink(&self) -> RecordingSink;

    fn finish(self: Box<Self>) -> Result<Recording>;
}

/// In-memory recorder that encodes captures as 16-bit WAV.
#[derive(Debug, Clone, Default)]
pub struct WavRecorder {
    active: Arc<AtomicUsize>,
}

impl WavRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_sessions(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

impl Recorder for WavRecorder {
    fn start(&self, sample_rate: u32, channels: usize) -> Result<Box<dyn RecordingSession>> {
        if sample_rate == 0 || channels == 0 {
            return Err(MixError::InvalidParameter(format!(
                "cannot record {} channel(s) at {} Hz",
                channels, sample_rate
            )));
        }
        self.active
            .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| MixError::Busy)?;

        let (tx, rx) = flume::unbounded();
        debug!("Recording session started ({} Hz, {} ch)", sample_rate, channels);

        Ok(Box::new(WavSession {
            sink: RecordingSink {
                tx,
                format: SinkFormat {
                    sample_rate,
                    channels,
                },
            },
            rx,
            _guard: SessionGuard(self.active.clone()),
        }))
    }
}

struct SessionGuard(Arc<AtomicUsize>);

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
        debug!("Recording session released");
    }
}

struct WavSession {
    sink: RecordingSink,
    rx: Receiver<Vec<f32>>,
    _guard: SessionGuard,
}

impl RecordingSession for WavSession {
    fn sink(&self) -> RecordingSink {
        self.sink.clone()
    }

    fn finish(self: Box<Self>) -> Result<Recording> {
        let format = self.sink.format;
        let samples: Vec<f32> = self.rx.try_iter().flatten().collect();
        let buffer =
            AudioSampleBuffer::from_interleaved(format.sample_rate, format.channels, &samples)?;

        let leading_signal_samples = buffer.channel(0).map_or(0, leading_signal_count);
        let encoded_bytes = WavEncoder::encode(&buffer)?;
        debug!(
            "Recording finished: {} frames, {} bytes",
            buffer.frame_count(),
            encoded_bytes.len()
        );

        Ok(Recording {
            encoded_bytes,
            mime_type: WAV_MIME_TYPE.to_string(),
            frame_count: buffer.frame_count(),
            leading_signal_samples,
        })
    }
}
