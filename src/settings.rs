//! Game settings
//!
//! Loaded from an optional JSON file; missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rules;

/// Settings load/validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Raw timer interrupt rate
    pub raw_tick_hz: u32,
    /// Raw ticks per logical frame
    pub ticks_per_frame: u32,

    // === Rules ===
    /// Points needed to win (1-9)
    pub win_score: u8,
    /// Side walls are goals; false gives an endless rally
    pub side_goals: bool,

    // === Audio ===
    pub sound: bool,
    /// How long each tone holds the main loop
    pub tone_ms: u64,

    // === Host runtime ===
    /// Stop after this many frames (0 = play until someone wins)
    pub max_frames: u64,
    /// Seed for attract-mode input
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            raw_tick_hz: RAW_TICK_HZ,
            ticks_per_frame: TICKS_PER_FRAME,

            win_score: WIN_SCORE,
            side_goals: true,

            sound: true,
            tone_ms: 20,

            max_frames: 0,
            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from a file if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.raw_tick_hz == 0 {
            return Err(SettingsError::Invalid {
                field: "raw_tick_hz",
                reason: "must be positive",
            });
        }
        if self.ticks_per_frame == 0 {
            return Err(SettingsError::Invalid {
                field: "ticks_per_frame",
                reason: "must be positive",
            });
        }
        if self.win_score == 0 || self.win_score > MAX_SCORE {
            return Err(SettingsError::Invalid {
                field: "win_score",
                reason: "must be between 1 and 9",
            });
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            win_score: self.win_score,
            side_goals: self.side_goals,
        }
    }

    /// Time between raw ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.raw_tick_hz.max(1) as f64)
    }

    /// Logical frames per second
    pub fn frame_rate(&self) -> f64 {
        self.raw_tick_hz as f64 / self.ticks_per_frame.max(1) as f64
    }

    pub fn tone_duration(&self) -> Duration {
        Duration::from_millis(self.tone_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_at_15hz() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.frame_rate() - 15.0).abs() < 1e-9);
        assert_eq!(settings.rules(), Rules::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "win_score": 3, "side_goals": false }"#)
            .expect("valid settings");
        assert_eq!(settings.win_score, 3);
        assert!(!settings.side_goals);
        assert_eq!(settings.raw_tick_hz, RAW_TICK_HZ);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.max_frames = 42;
        let json = serde_json::to_string(&settings).expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "win_score": 12 }"#),
            Err(SettingsError::Invalid { field: "win_score", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "ticks_per_frame": 0 }"#),
            Err(SettingsError::Invalid { field: "ticks_per_frame", .. })
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/tick-pong.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io { .. })));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }
}
