//! Application Configuration
//!
//! User settings stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bridge::TaskOptions;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Recognizer settings
    pub recognizer: RecognizerSettings,
    /// Output settings
    pub output: OutputSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Recognizer-related settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerSettings {
    /// Give up waiting on the recognizer after this many milliseconds.
    /// Unset waits as long as the engine takes.
    pub timeout_ms: Option<u64>,
}

impl From<&RecognizerSettings> for TaskOptions {
    fn from(settings: &RecognizerSettings) -> Self {
        TaskOptions {
            recognizer_timeout: settings.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// Output-related settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print the JSON tree
    pub pretty_json: bool,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("org", "camtext", "CameraTextBridge")
        .context("Could not determine config directory")?;

    let config_dir = proj_dirs.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Load configuration from an explicit path, the config directory, or defaults.
///
/// Also returns the file the configuration came from, `None` for defaults.
/// Nothing is logged here since this runs before the subscriber is installed.
pub fn load_or_create_config(explicit: Option<&Path>) -> Result<(AppConfig, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let config = load_config(path)
            .with_context(|| format!("Failed to load configuration from {:?}", path))?;
        return Ok((config, Some(path.to_path_buf())));
    }

    if let Ok(config_dir) = get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = load_config(&config_path) {
                return Ok((config, Some(config_path)));
            }
        }
    }
    Ok((AppConfig::default(), None))
}
