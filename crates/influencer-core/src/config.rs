//! Session configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::DAILY_EVENT_CHANCE;
use crate::persistence::SAVE_KEY;
use crate::transitions::Rules;
use influencer_logic::constants::limits;

/// Wall-clock seconds per in-game hour.
pub const DEFAULT_TICK_SECONDS: f64 = 30.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a game session.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Wall-clock seconds per in-game hour
    pub tick_seconds: f64,
    /// Chance that a new day starts with an event
    pub daily_event_chance: f64,
    /// How many events the log keeps
    pub event_log_cap: usize,
    /// Save after every accepted action
    pub autosave: bool,
    /// Seed for reproducible sessions; entropy when absent
    pub seed: Option<u64>,
    /// Key the game is saved under
    pub save_key: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: DEFAULT_TICK_SECONDS,
            daily_event_chance: DAILY_EVENT_CHANCE,
            event_log_cap: limits::EVENT_LOG_CAP,
            autosave: true,
            seed: None,
            save_key: SAVE_KEY.to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_seconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        if !(0.0..=1.0).contains(&self.daily_event_chance) {
            return Err(ConfigError::Invalid(format!(
                "daily_event_chance must be in [0, 1], got {}",
                self.daily_event_chance
            )));
        }
        if self.event_log_cap == 0 {
            return Err(ConfigError::Invalid("event_log_cap must be at least 1".into()));
        }
        if self.save_key.trim().is_empty() {
            return Err(ConfigError::Invalid("save_key is empty".into()));
        }
        Ok(())
    }

    /// Wall time per tick; a non-positive or unrepresentable value falls
    /// back to [`DEFAULT_TICK_SECONDS`].
    pub fn tick_interval(&self) -> Duration {
        match Duration::try_from_secs_f64(self.tick_seconds) {
            Ok(interval) if !interval.is_zero() => interval,
            _ => Duration::from_secs_f64(DEFAULT_TICK_SECONDS),
        }
    }

    pub fn rules(&self) -> Rules {
        Rules {
            daily_event_chance: self.daily_event_chance,
            event_log_cap: self.event_log_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_secs(30));
        assert_eq!(config.rules(), Rules::default());
        assert_eq!(config.save_key, "influencer-x-save");
        assert!(config.autosave);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SimConfig::from_json_str(r#"{"tick_seconds": 0.5, "seed": 7}"#).unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(500));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.event_log_cap, 10);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SimConfig::from_json_str(r#"{"tick_seconds": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str(r#"{"daily_event_chance": 1.5}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str(r#"{"autosave": "yes"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_zero_tick_falls_back_to_default() {
        for tick_seconds in [0.0, -1.0, f64::NAN] {
            let config = SimConfig {
                tick_seconds,
                ..SimConfig::default()
            };
            assert_eq!(config.tick_interval(), Duration::from_secs(30), "{tick_seconds}");
        }
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.json");
        std::fs::write(&path, r#"{"autosave": false}"#).unwrap();
        let config = SimConfig::from_path(&path).unwrap();
        assert!(!config.autosave);
        assert!(matches!(
            SimConfig::from_path(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
