//! Configuration system for the board
//!
//! Supports loading configuration from:
//! 1. CLI --config argument
//! 2. ~/.config/board/config.{BOARD_ENV}.json
//! 3. Default values
//!
//! Where BOARD_ENV can be: production (default), development, test
//!
//! # Examples
//!
//! ```no_run
//! use board::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(None)?;
//! println!("Animation: {} steps over {} ms", config.animation.steps, config.animation.duration_ms);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variables
//!
//! Environment variables override config file values:
//! - BOARD_DATA_DIR
//! - BOARD_ANIMATION (`false`, `0`, `no` or `off` disables animation)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::data::DEFAULT_BRAND_COLOR;
use crate::ui::animations::{AnimationPolicy, DEFAULT_DURATION, DEFAULT_STEPS};
use crate::ui::theme::parse_hex_color;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Progress animation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time to reach the target, in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Frames per animation
    #[serde(default = "default_steps")]
    pub steps: u32,
}

fn default_true() -> bool {
    true
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION.as_millis() as u64
}

fn default_steps() -> u32 {
    DEFAULT_STEPS
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: default_duration_ms(),
            steps: default_steps(),
        }
    }
}

impl AnimationConfig {
    pub fn policy(&self) -> AnimationPolicy {
        AnimationPolicy {
            enabled: self.enabled,
            duration: Duration::from_millis(self.duration_ms),
            steps: self.steps,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding company.json and the project documents; bundled
    /// data is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub animation: AnimationConfig,

    /// UI redraw interval in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,

    /// Brand color for projects that do not declare one
    #[serde(default = "default_brand_color")]
    pub default_brand_color: String,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

fn default_tick_rate() -> u64 {
    25
}

fn default_brand_color() -> String {
    DEFAULT_BRAND_COLOR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            animation: AnimationConfig::default(),
            tick_rate_ms: default_tick_rate(),
            default_brand_color: default_brand_color(),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration with standard priority:
    /// 1. Explicit path
    /// 2. ~/.config/board/config.{BOARD_ENV}.json
    /// 3. Defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            if path.exists() {
                tracing::info!("Loading config from: {:?}", path);
                return Self::from_file(path);
            } else {
                return Err(ConfigError::ValidationError(format!(
                    "Config file not found: {:?}",
                    path
                )));
            }
        }

        let env = std::env::var("BOARD_ENV").unwrap_or_else(|_| "production".to_string());

        if let Some(config_dir) = Self::config_dir() {
            let config_path = config_dir.join(format!("config.{}.json", env));

            if config_path.exists() {
                tracing::info!("Loading config from: {:?}", config_path);
                return Self::from_file(&config_path);
            }
        }

        tracing::info!("Using default configuration with environment overrides");
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("BOARD_DATA_DIR") {
            if !dir.is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(value) = std::env::var("BOARD_ANIMATION") {
            self.animation.enabled = parse_flag(&value);
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animation.steps == 0 {
            return Err(ConfigError::ValidationError(
                "animation.steps must be greater than 0".to_string(),
            ));
        }

        if self.animation.duration_ms == 0 {
            return Err(ConfigError::ValidationError(
                "animation.duration_ms must be greater than 0".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than 0".to_string(),
            ));
        }

        if parse_hex_color(&self.default_brand_color).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "default_brand_color must look like #RRGGBB, got {}",
                self.default_brand_color
            )));
        }

        Ok(())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("board"))
    }
}

/// Anything but an explicit "off" keeps the flag on
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.animation.policy(), AnimationPolicy::default());
        assert_eq!(config.tick_rate(), Duration::from_millis(25));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.animation.steps = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.animation.duration_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.tick_rate_ms = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.default_brand_color = "blue".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(msg)) if msg.contains("blue")
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"animation": {"enabled": false}}"#).unwrap();
        assert!(!config.animation.enabled);
        assert_eq!(config.animation.steps, 60);
        assert_eq!(config.animation.duration_ms, 1500);
        assert_eq!(config.default_brand_color, "#1D4DFF");
        assert!(!config.animation.policy().animates(50.0));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" OFF "));
        assert!(!parse_flag("no"));
    }

    #[test]
    fn test_serialize_config() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.animation, parsed.animation);
        assert_eq!(config.tick_rate_ms, parsed.tick_rate_ms);
    }
}
