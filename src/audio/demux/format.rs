//! Audio format detection via header byte sniffing.

use crate::common::types::AudioFormat;

/// Sniff the container format from the first bytes of arbitrary data.
///
/// Requires at least 4 bytes. Returns `AudioFormat::Unknown` for anything
/// not in the table.
pub fn detect_format(header: &[u8]) -> AudioFormat {
    if header.len() < 4 {
        return AudioFormat::Unknown;
    }

    // WAV: "RIFF" + size + "WAVE"
    if header.starts_with(b"RIFF") && header.len() >= 12 && &header[8..12] == b"WAVE" {
        return AudioFormat::Wav;
    }

    // MP3: ID3v2 tag or an MPEG audio frame sync (11 set bits, layer != 0)
    if header.starts_with(b"ID3") {
        return AudioFormat::Mp3;
    }
    if header[0] == 0xFF && (header[1] & 0xE0) == 0xE0 && (header[1] & 0x06) != 0 {
        return AudioFormat::Mp3;
    }

    // ADTS AAC: sync word with layer bits == 0
    if header[0] == 0xFF && (header[1] & 0xF6) == 0xF0 {
        return AudioFormat::Aac;
    }

    if header.starts_with(b"OggS") {
        return AudioFormat::Ogg;
    }

    if header.starts_with(b"fLaC") {
        return AudioFormat::Flac;
    }

    // ftyp / MP4 / M4A: bytes [4..8] == "ftyp"
    if header.len() >= 8 && &header[4..8] == b"ftyp" {
        return AudioFormat::Mp4;
    }

    // EBML magic (WebM / Matroska)
    if header.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
        return AudioFormat::Webm;
    }

    AudioFormat::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_wav() {
        assert_eq!(detect_format(b"RIFF\x24\x00\x00\x00WAVEfmt "), AudioFormat::Wav);
        // RIFF without the WAVE form type is something else
        assert_eq!(detect_format(b"RIFF\x24\x00\x00\x00AVI "), AudioFormat::Unknown);
    }

    #[test]
    fn detect_mp3() {
        assert_eq!(detect_format(b"ID3\x04\x00\x00"), AudioFormat::Mp3);
        assert_eq!(detect_format(&[0xFF, 0xFB, 0x90, 0x64]), AudioFormat::Mp3);
    }

    #[test]
    fn detect_adts_aac() {
        assert_eq!(detect_format(&[0xFF, 0xF1, 0x50, 0x80]), AudioFormat::Aac);
    }

    #[test]
    fn detect_webm_and_mp4() {
        assert_eq!(
            detect_format(&[0x1A, 0x45, 0xDF, 0xA3, 0x00]),
            AudioFormat::Webm
        );
        assert_eq!(detect_format(b"\x00\x00\x00\x1Cftypisom"), AudioFormat::Mp4);
    }

    #[test]
    fn detect_unknown() {
        assert_eq!(detect_format(&[0x00, 0x00, 0x00, 0x00]), AudioFormat::Unknown);
        assert_eq!(detect_format(b"RI"), AudioFormat::Unknown);
    }
}
