//! `WavEncoder`: canonical 44-byte RIFF/WAVE header + 16-bit PCM.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//!  0  "RIFF"            4  total size - 8      8  "WAVE"
//! 12  "fmt "           16  16 (chunk len)     20  1 (PCM)
//! 22  channels         24  sample rate        28  byte rate
//! 32  block align      34  16 (bits)          36  "data"
//! 40  data length      44  interleaved samples
//! ```

use byteorder::{LittleEndian, WriteBytesExt};
use bytes::Bytes;

use crate::audio::AudioSampleBuffer;
use crate::audio::constants::{
    INT16_MAX_F, WAV_BITS_PER_SAMPLE, WAV_FMT_CHUNK_LEN, WAV_FORMAT_PCM, WAV_HEADER_LEN,
};
use crate::common::errors::{MixError, Result};

pub const WAV_MIME_TYPE: &str = "audio/wav";

pub struct WavEncoder;

impl WavEncoder {
    /// Serialize `buffer` as a 16-bit PCM WAV file.
    ///
    /// Samples are clipped to `[-1, 1]` and scaled by 32767; NaN becomes 0.
    pub fn encode(buffer: &AudioSampleBuffer) -> Result<Bytes> {
        let channels = buffer.channel_count();
        if channels == 0 {
            return Err(MixError::Encode("buffer has no channels".into()));
        }
        let channels = u16::try_from(channels)
            .map_err(|_| MixError::Encode(format!("{} channels exceed WAV limits", channels)))?;
        let sample_rate = buffer.sample_rate();
        if sample_rate == 0 {
            return Err(MixError::Encode("sample rate must be non-zero".into()));
        }

        let block_align = channels as u32 * 2;
        let byte_rate = sample_rate
            .checked_mul(block_align)
            .ok_or_else(|| MixError::Encode("byte rate overflows u32".into()))?;
        let data_len = (buffer.frame_count() as u64) * block_align as u64;
        if data_len > (u32::MAX - 36) as u64 {
            return Err(MixError::Encode(format!(
                "{} bytes of PCM exceed the RIFF size limit",
                data_len
            )));
        }
        let data_len = data_len as u32;

        let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);
        Self::write_header(&mut out, channels, sample_rate, byte_rate, block_align as u16, data_len)
            .map_err(|e| MixError::Encode(e.to_string()))?;

        for sample in buffer.interleaved() {
            out.write_i16::<LittleEndian>(Self::quantize(sample))
                .map_err(|e| MixError::Encode(e.to_string()))?;
        }

        Ok(Bytes::from(out))
    }

    fn write_header(
        out: &mut Vec<u8>,
        channels: u16,
        sample_rate: u32,
        byte_rate: u32,
        block_align: u16,
        data_len: u32,
    ) -> std::io::Result<()> {
        out.extend_from_slice(b"RIFF");
        out.write_u32::<LittleEndian>(36 + data_len)?;
        out.extend_from_slice(b"WAVE");

        out.extend_from_slice(b"fmt ");
        out.write_u32::<LittleEndian>(WAV_FMT_CHUNK_LEN)?;
        out.write_u16::<LittleEndian>(WAV_FORMAT_PCM)?;
        out.write_u16::<LittleEndian>(channels)?;
        out.write_u32::<LittleEndian>(sample_rate)?;
        out.write_u32::<LittleEndian>(byte_rate)?;
        out.write_u16::<LittleEndian>(block_align)?;
        out.write_u16::<LittleEndian>(WAV_BITS_PER_SAMPLE)?;

        out.extend_from_slice(b"data");
        out.write_u32::<LittleEndian>(data_len)?;
        Ok(())
    }

    #[inline]
    pub fn quantize(sample: f32) -> i16 {
        if sample.is_nan() {
            return 0;
        }
        (sample.clamp(-1.0, 1.0) * INT16_MAX_F).round() as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(b: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([b[at], b[at + 1]])
    }

    fn u32_at(b: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
    }

    #[test]
    fn header_is_byte_exact() {
        let buf = AudioSampleBuffer::silent(44_100, 2, 10).unwrap();
        let wav = WavEncoder::encode(&buf).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), wav.len() as u32 - 8);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 2);
        assert_eq!(u32_at(&wav, 24), 44_100);
        assert_eq!(u32_at(&wav, 28), 44_100 * 2 * 2);
        assert_eq!(u16_at(&wav, 32), 4);
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 40);
    }

    #[test]
    fn length_matches_frames_and_channels() {
        for (channels, frames) in [(1usize, 0usize), (1, 3), (2, 7), (6, 128)] {
            let buf = AudioSampleBuffer::silent(22_050, channels, frames).unwrap();
            let wav = WavEncoder::encode(&buf).unwrap();
            assert_eq!(wav.len(), 44 + frames * channels * 2);
        }
    }

    #[test]
    fn stereo_is_interleaved_left_right() {
        let buf =
            AudioSampleBuffer::from_channels(8_000, vec![vec![0.5, 1.0], vec![-0.5, -1.0]]).unwrap();
        let wav = WavEncoder::encode(&buf).unwrap();
        let pcm: Vec<i16> = wav[44..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(pcm, vec![16_384, -16_384, 32_767, -32_767]);
    }

    #[test]
    fn out_of_range_samples_are_clipped() {
        assert_eq!(WavEncoder::quantize(1.75), 32_767);
        assert_eq!(WavEncoder::quantize(-3.0), -32_767);
        assert_eq!(WavEncoder::quantize(f32::NAN), 0);
        assert_eq!(WavEncoder::quantize(0.0), 0);
    }
}
