//! Configuration for the recognizer.

use crate::core::classifier::DEFAULT_K;
use crate::core::debounce::DebounceSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Longest accepted hold interval or tense window.
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum time between two accepted gestures
    #[serde(with = "duration_serde")]
    pub hold_interval: Duration,

    /// Window in which a repeated consonant becomes its tensed form
    #[serde(with = "duration_serde")]
    pub tense_window: Duration,

    /// Neighbour count for the classifier
    pub k: usize,

    /// Path of the reference dataset CSV
    pub dataset_path: PathBuf,

    /// Capacity of the frame channel between reader and session
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hangul-sign");

        Self {
            hold_interval: Duration::from_millis(2000),
            tense_window: Duration::from_millis(1500),
            k: DEFAULT_K,
            dataset_path: data_dir.join("gesture_train.csv"),
            channel_capacity: 1024,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a file, falling back to defaults when it does
    /// not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hangul-sign")
            .join("config.json")
    }

    /// Check that the values can drive a session.
    ///
    /// A tense window no longer than the hold interval is accepted but
    /// logged: no repeat can then arrive in time to tense a consonant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 {
            return Err(ConfigError::Invalid("k must be at least 1".into()));
        }
        if self.hold_interval.is_zero() {
            return Err(ConfigError::Invalid("hold_interval must be positive".into()));
        }
        if self.tense_window.is_zero() {
            return Err(ConfigError::Invalid("tense_window must be positive".into()));
        }
        for (name, interval) in [
            ("hold_interval", self.hold_interval),
            ("tense_window", self.tense_window),
        ] {
            if interval > MAX_INTERVAL {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most {}s, got {}s",
                    MAX_INTERVAL.as_secs(),
                    interval.as_secs_f64()
                )));
            }
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be at least 1".into(),
            ));
        }
        if self.tense_window <= self.hold_interval {
            tracing::warn!(
                "tense_window ({:.1}s) <= hold_interval ({:.1}s): consonants can never be tensed",
                self.tense_window.as_secs_f64(),
                self.hold_interval.as_secs_f64()
            );
        }
        Ok(())
    }

    /// Timing parameters for the gesture debouncer. Intervals are capped at
    /// [`MAX_INTERVAL`].
    pub fn debounce_settings(&self) -> DebounceSettings {
        DebounceSettings {
            hold_interval: capped(self.hold_interval),
            tense_window: capped(self.tense_window),
        }
    }
}

fn capped(interval: Duration) -> chrono::Duration {
    chrono::Duration::milliseconds(interval.min(MAX_INTERVAL).as_millis() as i64)
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialize error: {0}")]
    Serialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Serde support for Duration as fractional seconds.
pub(crate) mod duration_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}
