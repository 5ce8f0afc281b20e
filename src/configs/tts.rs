use serde::{Deserialize, Serialize};

/// Speech synthesizer selection.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TtsConfig {
    #[serde(default)]
    pub provider: SpeechProvider,
    /// Language code sent to the remote endpoint.
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// Built-in offline tone voice.
    #[default]
    Tone,
    /// HTTP text-to-speech endpoint.
    Remote,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
