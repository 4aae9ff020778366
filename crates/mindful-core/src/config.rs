//! TOML-based site configuration.
//!
//! Holds the tunables the widgets otherwise hard-code:
//! - Reply delays of the chat and coach widgets
//! - Meditation presets, default preset and tick interval
//! - Default log filter for the CLI
//!
//! Configuration is read from `~/.config/mindful/config.toml` (or an explicit
//! path). A missing file means defaults; the file is never written.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chat::ChatKind;
use crate::error::ConfigError;
use crate::meditation::{positive_preset, DEFAULT_PRESET_SECS, TICK_INTERVAL_MS};

/// Chat-window configuration.
///
/// An absent `reply_delay_ms` (including an empty `[chat]` table) means the
/// widget's own delay; use [`Config::reply_delay_ms`] to read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_delay_ms: Option<u64>,
}

/// Meditation timer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_preset_secs")]
    pub default_preset_secs: u64,
    /// `data-sec` of the preset buttons on the services page.
    #[serde(default = "default_presets")]
    pub presets: Vec<u64>,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_chat")]
    pub chat: ChatConfig,
    #[serde(default = "default_coach")]
    pub coach: ChatConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_chat() -> ChatConfig {
    ChatConfig {
        reply_delay_ms: Some(ChatKind::Chat.default_delay_ms()),
    }
}
fn default_coach() -> ChatConfig {
    ChatConfig {
        reply_delay_ms: Some(ChatKind::Coach.default_delay_ms()),
    }
}
fn default_preset_secs() -> u64 {
    DEFAULT_PRESET_SECS
}
fn default_presets() -> Vec<u64> {
    vec![60, 300, 600]
}
fn default_tick_interval_ms() -> u64 {
    TICK_INTERVAL_MS
}
fn default_log_filter() -> String {
    "info".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_preset_secs: default_preset_secs(),
            presets: default_presets(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat: default_chat(),
            coach: default_coach(),
            timer: TimerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Returns `~/.config/mindful[-dev]/` based on MINDFUL_ENV.
///
/// Set MINDFUL_ENV=dev to use the development directory.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let env = std::env::var("MINDFUL_ENV").unwrap_or_else(|_| "production".to_string());
    Ok(if env == "dev" {
        base_dir.join("mindful-dev")
    } else {
        base_dir.join("mindful")
    })
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if it holds values the widgets cannot use.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.presets.is_empty() {
            return Err(invalid("timer.presets", "at least one preset is required"));
        }
        for &secs in &self.timer.presets {
            positive_preset(secs).map_err(|e| invalid("timer.presets", &e.to_string()))?;
        }
        positive_preset(self.timer.default_preset_secs)
            .map_err(|e| invalid("timer.default_preset_secs", &e.to_string()))?;
        if self.timer.tick_interval_ms == 0 {
            return Err(invalid("timer.tick_interval_ms", "must be positive"));
        }
        Ok(())
    }

    pub fn reply_delay_ms(&self, kind: ChatKind) -> u64 {
        let configured = match kind {
            ChatKind::Chat => self.chat.reply_delay_ms,
            ChatKind::Coach => self.coach.reply_delay_ms,
        };
        configured.unwrap_or_else(|| kind.default_delay_ms())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.into(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let parsed: Config = toml::from_str(&cfg.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.reply_delay_ms(ChatKind::Chat), 400);
        assert_eq!(cfg.reply_delay_ms(ChatKind::Coach), 350);
        assert_eq!(cfg.timer.default_preset_secs, 60);
        assert_eq!(cfg.timer.tick_interval_ms, 1000);
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timer]\npresets = [120, 900]").unwrap();
        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.timer.presets, vec![120, 900]);
        assert_eq!(cfg.timer.default_preset_secs, 60);
        assert_eq!(cfg.reply_delay_ms(ChatKind::Coach), 350);
    }

    #[test]
    fn empty_chat_table_keeps_widget_delays() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chat]\n[coach]\n[timer]\npresets = [60]").unwrap();
        let cfg = Config::load_from(file.path()).unwrap();
        assert_eq!(cfg.chat.reply_delay_ms, None);
        assert_eq!(cfg.reply_delay_ms(ChatKind::Chat), 400);
        assert_eq!(cfg.reply_delay_ms(ChatKind::Coach), 350);
    }

    #[test]
    fn explicit_chat_delay_wins() {
        let cfg: Config = toml::from_str("[chat]\nreply_delay_ms = 50").unwrap();
        assert_eq!(cfg.reply_delay_ms(ChatKind::Chat), 50);
        assert_eq!(cfg.reply_delay_ms(ChatKind::Coach), 350);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn rejects_zero_preset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timer]\npresets = [0, 60]").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "timer.presets"));
    }

    #[test]
    fn rejects_zero_default_preset() {
        let cfg: Config = toml::from_str("[timer]\ndefault_preset_secs = 0").unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "timer.default_preset_secs"
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timer\npresets = ").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
