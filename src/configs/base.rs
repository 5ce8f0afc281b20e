use serde::{Deserialize, Serialize};

use crate::audio::constants::{MAX_RENDER_SAMPLE_RATE, MIN_RENDER_SAMPLE_RATE};
use crate::common::errors::{MixError, Result};
use crate::configs::*;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub mixer: MixerConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub tts: TtsConfig,
}

impl Config {
    /// Reads `prismix.toml`, falling back to `prismix.default.toml`.
    pub fn load() -> Result<Self> {
        let config_path = if std::path::Path::new("prismix.toml").exists() {
            "prismix.toml"
        } else if std::path::Path::new("prismix.default.toml").exists() {
            "prismix.default.toml"
        } else {
            return Err(MixError::InvalidParameter(
                "prismix.toml or prismix.default.toml not found".into(),
            ));
        };

        tracing::debug!("Loading configuration from: {}", config_path);

        let config_str = std::fs::read_to_string(config_path).map_err(|e| {
            MixError::InvalidParameter(format!("failed to read {}: {}", config_path, e))
        })?;
        if config_str.trim().is_empty() {
            return Err(MixError::InvalidParameter(format!(
                "{} is empty",
                config_path
            )));
        }

        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)
            .map_err(|e| MixError::InvalidParameter(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.mixer.default_placement) {
            return Err(MixError::InvalidParameter(format!(
                "mixer.default_placement must be within [0, 1], got {}",
                self.mixer.default_placement
            )));
        }
        let rates = MIN_RENDER_SAMPLE_RATE..=MAX_RENDER_SAMPLE_RATE;
        for (key, rate) in [
            ("mixer.target_sample_rate", self.mixer.target_sample_rate),
            ("capture.sample_rate", self.capture.sample_rate),
        ] {
            if !rates.contains(&rate) {
                return Err(MixError::InvalidParameter(format!(
                    "{} must be within {}..={} Hz, got {}",
                    key, MIN_RENDER_SAMPLE_RATE, MAX_RENDER_SAMPLE_RATE, rate
                )));
            }
        }
        if self.mixer.overall_budget_ms == 0 {
            return Err(MixError::InvalidParameter(
                "mixer.overall_budget_ms must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.mixer.target_sample_rate, 22_050);
        assert_eq!(config.mixer.busy_policy, BusyPolicy::Reject);
        assert_eq!(config.mixer.resample_quality, ResampleQuality::Hermite);
        assert!((config.mixer.default_placement - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.capture.sample_rate, 22_050);
        assert_eq!(config.capture.tail_ms, 100);
        assert_eq!(config.fetch.asset_root, "public");
        assert!(config.logging.is_none());
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            [logging]
            level = "debug"

            [logging.file]
            path = "logs/prismix.log"

            [mixer]
            target_sample_rate = 44100
            busy_policy = "queue"
            resample_quality = "sinc"

            [capture]
            time_budget_ms = 1500

            [tts]
            provider = "remote"
            language = "id"
            "#,
        )
        .unwrap();

        assert_eq!(config.mixer.target_sample_rate, 44_100);
        assert_eq!(config.mixer.busy_policy, BusyPolicy::Queue);
        assert_eq!(config.mixer.resample_quality, ResampleQuality::Sinc);
        assert_eq!(config.capture.time_budget_ms, 1500);
        assert_eq!(config.tts.provider, SpeechProvider::Remote);
        assert_eq!(config.tts.language, "id");
        let file = config.logging.unwrap().file.unwrap();
        assert_eq!(file.path, "logs/prismix.log");
        assert_eq!(file.max_lines, 10_000);
    }

    #[test]
    fn unrenderable_sample_rates_are_rejected() {
        for doc in [
            "[mixer]\ntarget_sample_rate = 1000",
            "[mixer]\ntarget_sample_rate = 0",
            "[mixer]\ntarget_sample_rate = 1000000",
            "[capture]\nsample_rate = 2999",
        ] {
            let err = Config::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, MixError::InvalidParameter(_)), "{}", doc);
        }

        let edges = Config::from_toml_str(
            "[mixer]\ntarget_sample_rate = 3000\n[capture]\nsample_rate = 768000",
        )
        .unwrap();
        assert_eq!(edges.mixer.target_sample_rate, 3_000);
        assert_eq!(edges.capture.sample_rate, 768_000);
    }

    #[test]
    fn zero_overall_budget_is_rejected() {
        let err = Config::from_toml_str("[mixer]\noverall_budget_ms = 0").unwrap_err();
        assert!(matches!(err, MixError::InvalidParameter(_)));
    }

    #[test]
    fn out_of_range_placement_is_rejected() {
        let err = Config::from_toml_str("[mixer]\ndefault_placement = 1.5").unwrap_err();
        assert!(matches!(err, MixError::InvalidParameter(_)));
    }
}
