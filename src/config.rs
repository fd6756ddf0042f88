// src/config.rs
//! Configuration stored as JSON under the user's config directory

use crate::{
    display::ConsoleFormat,
    error::{Result, TrackerError},
};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_BAUDRATE: u32 = 9600;
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub gps_port: Option<String>,
    pub gps_baudrate: u32,
    pub debug_port: Option<String>, // None = stdout
    pub debug_baudrate: u32,
    pub report_interval_secs: u64,
    pub format: ConsoleFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            gps_port: None,
            gps_baudrate: DEFAULT_BAUDRATE,
            debug_port: None,
            debug_baudrate: DEFAULT_BAUDRATE,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            format: ConsoleFormat::Text,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load from a file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackerError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| TrackerError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// `$HOME/.config/gps-tracker/config.json`
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| TrackerError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("gps-tracker").join("config.json"))
    }

    /// Reject settings a serial line cannot use
    pub fn validate(&self) -> Result<()> {
        if self.gps_baudrate == 0 || self.debug_baudrate == 0 {
            return Err(TrackerError::Config("baud rate must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Pause after each fix report
    pub fn report_interval(&self) -> Duration {
        Duration::from_secs(self.report_interval_secs)
    }
}
