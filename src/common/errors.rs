/// Every failure the mixing pipeline can produce.
///
/// Stage errors never escape [`crate::engine::MixOrchestrator::produce_mix`];
/// they are folded into a degraded result there.
#[derive(Debug, thiserror::Error)]
pub enum MixError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("voice capture timed out after {0} ms")]
    CaptureTimeout(u64),
    #[error("voice capture is silent")]
    CaptureEmpty,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("invalid buffer: {0}")]
    InvalidBuffer(String),
    #[error("render error: {0}")]
    Render(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("fetch error: {0}")]
    Fetch(String),
    #[error("speech synthesis error: {0}")]
    Synthesis(String),
    #[error("a mix is already in progress")]
    Busy,
    #[error("request cancelled")]
    Cancelled,
    #[error("request exceeded the {0} ms budget")]
    Timeout(u64),
    #[error("background task failed: {0}")]
    Task(String),
}

impl MixError {
    /// Stable short name, used in log fields and result reasons.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DecodeError",
            Self::CaptureTimeout(_) => "CaptureTimeout",
            Self::CaptureEmpty => "CaptureEmpty",
            Self::InvalidParameter(_) => "InvalidParameter",
            Self::InvalidBuffer(_) => "InvalidBuffer",
            Self::Render(_) => "RenderError",
            Self::Encode(_) => "EncodeError",
            Self::Fetch(_) => "FetchError",
            Self::Synthesis(_) => "SynthesisError",
            Self::Busy => "Busy",
            Self::Cancelled => "Cancelled",
            Self::Timeout(_) => "Timeout",
            Self::Task(_) => "TaskError",
        }
    }
}

impl From<symphonia::core::errors::Error> for MixError {
    fn from(e: symphonia::core::errors::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for MixError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fetch(e.to_string())
    }
}

impl From<tokio::task::JoinError> for MixError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MixError>;
