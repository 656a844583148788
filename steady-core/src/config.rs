//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/steady/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/steady/` (~/.config/steady/)
//! - Data: `$XDG_DATA_HOME/steady/` (~/.local/share/steady/)
//! - State/Logs: `$XDG_STATE_HOME/steady/` (~/.local/state/steady/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Summary assembly configuration
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weekly summary configuration
#[derive(Debug, Deserialize)]
pub struct SummaryConfig {
    /// How many weeks of history the weekly summary analyzes
    #[serde(default = "default_weeks_back")]
    pub weeks_back: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            weeks_back: default_weeks_back(),
        }
    }
}

fn default_weeks_back() -> u32 {
    2
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/steady/config.toml` (~/.config/steady/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("steady").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    ///
    /// `$XDG_DATA_HOME/steady/` (~/.local/share/steady/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("steady")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/steady/` (~/.local/state/steady/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("steady")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/steady/steady.db` (~/.local/share/steady/steady.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("steady.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/steady/steady.log` (~/.local/state/steady/steady.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("steady.log")
    }
}
