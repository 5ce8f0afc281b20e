//! Demux layer: container sniffing and symphonia track selection.

pub mod format;

pub use format::detect_format;

use bytes::Bytes;
use symphonia::core::{
    codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions},
    formats::{FormatOptions, FormatReader},
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};
use tracing::debug;

pub use crate::common::types::AudioFormat;
use crate::common::errors::{MixError, Result};

/// A probed container with its first decodable audio track.
pub struct OpenedTrack {
    pub format: Box<dyn FormatReader>,
    pub track_id: u32,
    pub decoder: Box<dyn Decoder>,
    /// Native rate reported by the container, if any.
    pub sample_rate: Option<u32>,
}

/// Probe `bytes` and open the first track symphonia can decode.
///
/// `kind` wins over sniffing; unknown kinds fall back to the leading bytes.
pub fn open_format(bytes: Bytes, kind: Option<AudioFormat>) -> Result<OpenedTrack> {
    if bytes.is_empty() {
        return Err(MixError::Decode("empty input".into()));
    }

    let kind = kind
        .filter(AudioFormat::is_known)
        .unwrap_or_else(|| detect_format(&bytes));

    let mut hint = Hint::new();
    if kind.is_known() {
        hint.with_extension(kind.as_ext());
        hint.mime_type(kind.mime_type());
    }
    debug!("Probing {} bytes as {:?}", bytes.len(), kind);

    let mss = MediaSourceStream::new(Box::new(std::io::Cursor::new(bytes)), Default::default());
    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MixError::Decode("no audio track found".into()))?;

    let track_id = track.id;
    let sample_rate = track.codec_params.sample_rate;
    let decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    Ok(OpenedTrack {
        format,
        track_id,
        decoder,
        sample_rate,
    })
}
