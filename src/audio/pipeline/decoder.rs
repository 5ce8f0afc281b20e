use bytes::Bytes;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::errors::Error;
use tracing::{debug, warn};

use crate::audio::AudioSampleBuffer;
use crate::audio::demux::{self, AudioFormat};
use crate::common::errors::{MixError, Result};

/// Turns encoded audio into planar PCM at the source's native rate.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, bytes: Bytes, hint: Option<AudioFormat>) -> Result<AudioSampleBuffer>;
}

/// Symphonia-backed decoder for every format the crate enables
/// (WAV/PCM, MP3, FLAC, Ogg Vorbis, AAC/MP4, MKV).
///
/// Holds no per-stream state, so one instance can be shared by every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: Bytes, hint: Option<AudioFormat>) -> Result<AudioSampleBuffer> {
        let mut opened = demux::open_format(bytes, hint)?;

        let mut sample_buf: Option<SampleBuffer<f32>> = None;
        let mut interleaved: Vec<f32> = Vec::new();
        let mut spec_rate = opened.sample_rate;
        let mut spec_channels = 0usize;

        loop {
            let packet = match opened.format.next_packet() {
                Ok(packet) => packet,
                Err(Error::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(Error::ResetRequired) => break,
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != opened.track_id {
                continue;
            }

            match opened.decoder.decode(&packet) {
                Ok(audio_buf) => {
                    let spec = *audio_buf.spec();
                    let frames = audio_buf.capacity();
                    let needed = frames * spec.channels.count();
                    if sample_buf.as_ref().map_or(true, |b| b.capacity() < needed) {
                        sample_buf = Some(SampleBuffer::<f32>::new(frames as u64, spec));
                    }
                    let Some(buf) = sample_buf.as_mut() else {
                        continue;
                    };

                    buf.copy_interleaved_ref(audio_buf);
                    interleaved.extend_from_slice(buf.samples());
                    spec_rate = Some(spec.rate);
                    spec_channels = spec.channels.count();
                }
                Err(Error::DecodeError(e)) => {
                    warn!("Skipping undecodable packet: {}", e);
                    continue;
                }
                Err(Error::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }
        }

        let sample_rate =
            spec_rate.ok_or_else(|| MixError::Decode("stream has no sample rate".into()))?;
        if spec_channels == 0 || interleaved.is_empty() {
            return Err(MixError::Decode("stream contains no audio frames".into()));
        }

        let buffer = AudioSampleBuffer::from_interleaved(sample_rate, spec_channels, &interleaved)?;
        debug!(
            "Decoded {} frames, {} channels @ {}Hz",
            buffer.frame_count(),
            buffer.channel_count(),
            buffer.sample_rate()
        );
        Ok(buffer)
    }
}
