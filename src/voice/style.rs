use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::common::errors::MixError;

/// Named voice presets offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleProfile {
    #[serde(rename = "DJ")]
    Dj,
    Radio,
    Hype,
    Smooth,
    Robot,
}

/// Synthesizer parameters. `rate` and `pitch` are multipliers around 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl StyleProfile {
    pub const ALL: [StyleProfile; 5] = [Self::Dj, Self::Radio, Self::Hype, Self::Smooth, Self::Robot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dj => "DJ",
            Self::Radio => "Radio",
            Self::Hype => "Hype",
            Self::Smooth => "Smooth",
            Self::Robot => "Robot",
        }
    }

    pub fn voice_params(&self) -> VoiceParams {
        let (rate, pitch) = match self {
            Self::Dj => (1.0, 0.8),
            Self::Radio => (1.1, 0.9),
            Self::Hype => (1.2, 1.0),
            Self::Smooth => (1.0, 0.9),
            Self::Robot => (0.9, 0.5),
        };
        VoiceParams {
            rate,
            pitch,
            volume: 1.0,
        }
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::Dj
    }
}

impl fmt::Display for StyleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleProfile {
    type Err = MixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| MixError::InvalidParameter(format!("unknown voice style '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("dj".parse::<StyleProfile>().unwrap(), StyleProfile::Dj);
        assert_eq!(" HYPE ".parse::<StyleProfile>().unwrap(), StyleProfile::Hype);
        assert!(matches!(
            "opera".parse::<StyleProfile>(),
            Err(MixError::InvalidParameter(_))
        ));
    }

    #[test]
    fn hype_is_fastest_and_robot_lowest() {
        let params: Vec<VoiceParams> = StyleProfile::ALL.iter().map(|s| s.voice_params()).collect();
        let hype = StyleProfile::Hype.voice_params();
        let robot = StyleProfile::Robot.voice_params();
        assert!(params.iter().all(|p| p.rate <= hype.rate && p.pitch <= hype.pitch));
        assert!(params.iter().all(|p| p.rate >= robot.rate && p.pitch >= robot.pitch));
    }

    #[test]
    fn display_matches_serde_name() {
        assert_eq!(StyleProfile::Dj.to_string(), "DJ");
        let parsed: StyleProfile = toml::from_str::<Wrapper>("s = \"DJ\"").unwrap().s;
        assert_eq!(parsed, StyleProfile::Dj);
    }

    #[derive(serde::Deserialize)]
    struct Wrapper {
        s: StyleProfile,
    }
}
