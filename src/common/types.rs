/// Audio containers the pipeline knows how to name, sniff or hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AudioFormat {
    Aac,
    Webm,
    Mp4,
    Mp3,
    Ogg,
    Flac,
    Wav,
    Unknown,
}

impl AudioFormat {
    pub fn as_ext(&self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Webm => "webm",
            Self::Mp4 => "m4a",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Unknown => "",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Aac => "audio/aac",
            Self::Webm => "audio/webm",
            Self::Mp4 => "audio/mp4",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Unknown => "application/octet-stream",
        }
    }

    pub fn from_ext(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "aac" => Self::Aac,
            "webm" | "mkv" => Self::Webm,
            "mp4" | "m4a" => Self::Mp4,
            "mp3" => Self::Mp3,
            "ogg" | "oga" => Self::Ogg,
            "flac" => Self::Flac,
            "wav" | "wave" => Self::Wav,
            _ => Self::Unknown,
        }
    }

    /// Maps a MIME / content-type value, ignoring parameters such as `codecs=`.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence.to_lowercase().as_str() {
            "audio/aac" | "audio/x-aac" => Self::Aac,
            "audio/webm" | "video/webm" => Self::Webm,
            "audio/mp4" | "audio/x-m4a" => Self::Mp4,
            "audio/mpeg" | "audio/mp3" => Self::Mp3,
            "audio/ogg" | "application/ogg" => Self::Ogg,
            "audio/flac" | "audio/x-flac" => Self::Flac,
            "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => Self::Wav,
            _ => Self::Unknown,
        }
    }

    /// Extension-based guess from a URL or path, query string ignored.
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        std::path::Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .map(Self::from_ext)
            .unwrap_or(Self::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_extension_ignores_query() {
        assert_eq!(AudioFormat::from_url("/edm/myedm1.mp3"), AudioFormat::Mp3);
        assert_eq!(
            AudioFormat::from_url("https://cdn.example.com/a/b.WAV?sig=1#t"),
            AudioFormat::Wav
        );
        assert_eq!(AudioFormat::from_url("blob:prismix/1234"), AudioFormat::Unknown);
    }

    #[test]
    fn mime_parameters_are_stripped() {
        assert_eq!(
            AudioFormat::from_mime("audio/webm;codecs=opus"),
            AudioFormat::Webm
        );
        assert_eq!(AudioFormat::from_mime("audio/wav"), AudioFormat::Wav);
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
    }
}
