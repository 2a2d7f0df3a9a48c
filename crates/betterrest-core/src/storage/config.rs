//! TOML-based application configuration.
//!
//! Stores user preferences only:
//! - Default form values (wake time, sleep hours, coffee cups)
//! - Optional path to a sleep model artifact
//! - Clock display format
//!
//! Configuration is stored at `~/.config/betterrest/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::form::{clamp_coffee_cups, clamp_sleep_hours, DEFAULT_COFFEE_CUPS, DEFAULT_SLEEP_HOURS};

const WAKE_TIME_FORMAT: &str = "%H:%M";

/// Default values the form starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// "HH:MM"
    #[serde(default = "default_wake_time")]
    pub wake_time: String,
    #[serde(default = "default_sleep_hours")]
    pub sleep_hours: f64,
    #[serde(default = "default_coffee_cups")]
    pub coffee_cups: u32,
}

/// Sleep model selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Artifact to load instead of the bundled model.
    #[serde(default)]
    pub artifact: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub clock_24h: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/betterrest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_wake_time() -> String {
    "08:00".into()
}
fn default_sleep_hours() -> f64 {
    DEFAULT_SLEEP_HOURS
}
fn default_coffee_cups() -> u32 {
    DEFAULT_COFFEE_CUPS
}
fn default_true() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            wake_time: default_wake_time(),
            sleep_hours: default_sleep_hours(),
            coffee_cups: default_coffee_cups(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { clock_24h: true }
    }
}

/// Parse "HH:MM".
pub fn parse_wake_time(value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), WAKE_TIME_FORMAT).map_err(|e| {
        ConfigError::InvalidValue {
            key: "defaults.wake_time".into(),
            message: format!("'{value}' is not HH:MM ({e})"),
        }
    })
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let not_a_number = || invalid(format!("cannot parse '{value}' as number"));

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(not_a_number)?
                        } else {
                            return Err(not_a_number());
                        }
                    }
                    // Optional values: empty string clears them
                    serde_json::Value::Null | serde_json::Value::String(_) if value.is_empty() => {
                        serde_json::Value::Null
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// Unset optional values come back as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        parse_wake_time(&self.defaults.wake_time)?;
        if !self.defaults.sleep_hours.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "defaults.sleep_hours".into(),
                message: "must be a finite number".into(),
            });
        }
        Ok(())
    }

    /// Default wake time, falling back to 08:00 if the stored value is invalid.
    pub fn wake_time(&self) -> NaiveTime {
        parse_wake_time(&self.defaults.wake_time).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring configured wake time");
            crate::form::default_wake_time()
        })
    }

    pub fn sleep_hours(&self) -> f64 {
        clamp_sleep_hours(self.defaults.sleep_hours)
    }

    pub fn coffee_cups(&self) -> u32 {
        clamp_coffee_cups(self.defaults.coffee_cups)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.defaults.wake_time, "08:00");
        assert_eq!(parsed.defaults.sleep_hours, 8.0);
        assert!(parsed.model.artifact.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("display.clock_24h").as_deref(), Some("true"));
        assert_eq!(cfg.get("defaults.coffee_cups").as_deref(), Some("1"));
        assert_eq!(cfg.get("defaults.wake_time").as_deref(), Some("08:00"));
        assert_eq!(cfg.get("model.artifact").as_deref(), Some(""));
        assert!(cfg.get("defaults.missing_key").is_none());
    }

    #[test]
    fn apply_updates_values() {
        let mut cfg = Config::default();
        cfg.apply("defaults.sleep_hours", "7.5").unwrap();
        cfg.apply("defaults.coffee_cups", "3").unwrap();
        cfg.apply("display.clock_24h", "false").unwrap();
        cfg.apply("model.artifact", "/tmp/model.toml").unwrap();
        assert_eq!(cfg.defaults.sleep_hours, 7.5);
        assert_eq!(cfg.defaults.coffee_cups, 3);
        assert!(!cfg.display.clock_24h);
        assert_eq!(cfg.model.artifact, Some(PathBuf::from("/tmp/model.toml")));

        assert_eq!(cfg.get("model.artifact").as_deref(), Some("/tmp/model.toml"));

        cfg.apply("model.artifact", "").unwrap();
        assert!(cfg.model.artifact.is_none());
        assert_eq!(cfg.get("model.artifact").as_deref(), Some(""));
    }

    #[test]
    fn whole_number_for_float_key_is_accepted() {
        let mut cfg = Config::default();
        cfg.apply("defaults.sleep_hours", "9").unwrap();
        assert_eq!(cfg.defaults.sleep_hours, 9.0);
    }

    #[test]
    fn apply_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.apply("defaults.tea_cups", "2"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(cfg.apply("display.clock_24h", "sometimes").is_err());
        assert!(cfg.apply("defaults.coffee_cups", "lots").is_err());
        assert!(cfg.apply("defaults.wake_time", "25:99").is_err());
        // Failed updates leave the config untouched
        assert_eq!(cfg.defaults.wake_time, "08:00");
    }

    #[test]
    fn accessors_clamp_stored_values() {
        let mut cfg = Config::default();
        cfg.defaults.sleep_hours = 20.0;
        cfg.defaults.coffee_cups = 0;
        cfg.defaults.wake_time = "garbage".into();
        assert_eq!(cfg.sleep_hours(), 12.0);
        assert_eq!(cfg.coffee_cups(), 1);
        assert_eq!(cfg.wake_time(), NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.defaults.wake_time, "08:00");
        assert!(path.exists());
    }

    #[test]
    fn load_from_reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nwake_time = \"06:30\"\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.wake_time(), NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert_eq!(cfg.defaults.sleep_hours, 8.0);
        assert!(cfg.display.clock_24h);
    }

    #[test]
    fn load_from_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
