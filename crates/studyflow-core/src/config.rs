//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Pomodoro schedule durations
//! - Study targets and default timer lengths
//! - Focus-mode behavior (override cooldown, blocked sites)
//! - The recurring alarm list
//!
//! Configuration is stored at `~/.config/studyflow/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::focus::default_blocked_sites;
use crate::gate::DEFAULT_COOLDOWN_SECS;

/// Returns `~/.config/studyflow[-dev]/` based on STUDYFLOW_ENV.
///
/// Set STUDYFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::home_dir()
        .ok_or_else(|| ConfigError::DataDir("home directory not found".into()))?
        .join(".config");

    let env = std::env::var("STUDYFLOW_ENV").unwrap_or_else(|_| "production".to_string());
    let dir = if env == "dev" {
        base.join("studyflow-dev")
    } else {
        base.join("studyflow")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Pomodoro schedule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_long_break_interval")]
    pub work_sessions_before_long_break: u32,
}

/// Study targets and default timer lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_daily_target_hours")]
    pub daily_target_hours: u32,
    #[serde(default = "default_focus_minutes")]
    pub default_focus_minutes: u32,
    #[serde(default = "default_countdown_minutes")]
    pub default_countdown_minutes: u32,
}

/// Focus-mode configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusConfig {
    #[serde(default = "default_cooldown_secs")]
    pub emergency_cooldown_secs: u32,
    #[serde(default = "default_blocked_sites")]
    pub blocked_sites: Vec<String>,
}

/// One persisted alarm entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmConfig {
    pub hour: u8,
    pub minute: u8,
    pub label: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_mon_to_sat")]
    pub days: [bool; 7],
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default = "default_alarms")]
    pub alarms: Vec<AlarmConfig>,
}

// Default functions
fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_daily_target_hours() -> u32 {
    4
}
fn default_focus_minutes() -> u32 {
    25
}
fn default_countdown_minutes() -> u32 {
    30
}
fn default_cooldown_secs() -> u32 {
    DEFAULT_COOLDOWN_SECS
}
fn default_true() -> bool {
    true
}
fn default_mon_to_sat() -> [bool; 7] {
    [true, true, true, true, true, true, false]
}

fn default_alarms() -> Vec<AlarmConfig> {
    vec![
        AlarmConfig {
            hour: 6,
            minute: 0,
            label: "Wake Up - Study Time".into(),
            enabled: true,
            days: default_mon_to_sat(),
        },
        AlarmConfig {
            hour: 6,
            minute: 30,
            label: "Alternative Wake Up".into(),
            enabled: false,
            days: default_mon_to_sat(),
        },
        AlarmConfig {
            hour: 23,
            minute: 0,
            label: "Sleep Reminder".into(),
            enabled: true,
            days: [true; 7],
        },
    ]
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            work_sessions_before_long_break: default_long_break_interval(),
        }
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            daily_target_hours: default_daily_target_hours(),
            default_focus_minutes: default_focus_minutes(),
            default_countdown_minutes: default_countdown_minutes(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            emergency_cooldown_secs: default_cooldown_secs(),
            blocked_sites: default_blocked_sites(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            study: StudyConfig::default(),
            focus: FocusConfig::default(),
            alarms: default_alarms(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing (and returning) the defaults when no file
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if
    /// the defaults cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a value as a string by dot-separated key
    /// (e.g. `schedule.work_minutes`).
    pub fn get(&self, key: &str) -> Option<String> {
        let mut node = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            node = node.get(part)?.clone();
        }
        match node {
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. The value must parse as the same
    /// type as the existing entry. Does not persist; call `save` after.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;

        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut node = &mut root;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = node.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = coerce(existing, value).ok_or(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                obj.insert(part.to_string(), new_value);
                *self = serde_json::from_value(root)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                return Ok(());
            }
            node = node.get_mut(part).ok_or_else(unknown)?;
        }
        Err(unknown())
    }
}

/// Parse `raw` into the same JSON shape as `existing`.
fn coerce(existing: &serde_json::Value, raw: &str) -> Option<serde_json::Value> {
    use serde_json::Value;
    match existing {
        Value::Bool(_) => raw.parse::<bool>().ok().map(Value::Bool),
        Value::Number(_) => raw.parse::<u64>().ok().map(|n| Value::Number(n.into())),
        Value::Array(_) => serde_json::from_str(raw).ok(),
        _ => Some(Value::String(raw.to_string())),
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
        assert_eq!(parsed.schedule.work_minutes, 25);
        assert_eq!(parsed.focus.emergency_cooldown_secs, 300);
        assert_eq!(parsed.alarms.len(), 3);
    }

    #[test]
    fn empty_toml_fills_every_default() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.schedule.short_break_minutes, 5);
        assert_eq!(cfg.study.daily_target_hours, 4);
        assert!(cfg.focus.blocked_sites.contains(&"reddit.com".to_string()));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("schedule.work_minutes").as_deref(), Some("25"));
        assert_eq!(
            cfg.get("study.default_countdown_minutes").as_deref(),
            Some("30")
        );
        assert!(cfg.get("schedule.missing_key").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set("schedule.work_minutes", "45").unwrap();
        assert_eq!(cfg.schedule.work_minutes, 45);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_value() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("schedule.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("schedule.work_minutes", "not_a_number"),
            Err(ConfigError::InvalidValue { .. })
        ));
        // Untouched on failure.
        assert_eq!(cfg.schedule.work_minutes, 25);
    }

    #[test]
    fn save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.set("study.daily_target_hours", "6").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.study.daily_target_hours, 6);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.schedule.work_minutes, 25);
        assert!(path.exists());
    }
}
