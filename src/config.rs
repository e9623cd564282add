// src/config.rs
//! Configuration management with a JSON file under the user's config dir

use crate::error::{GpsError, Result};
use crate::gps::{distance::DEFAULT_MIN_SATELLITES, Coordinate};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsConfig {
    pub device: String,
    pub baud_rate: u32,
    pub log_enabled: bool,
    pub log_file: Option<PathBuf>,
    pub error_log_file: PathBuf,
    pub debug: bool,
    pub read_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// Distances are only reported with more satellites than this
    pub distance_min_satellites: u32,
    pub target: Option<Coordinate>,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl GpsConfig {
    /// Get platform-specific default configuration
    pub fn platform_default() -> Self {
        #[cfg(windows)]
        let device = "COM3".to_string();

        #[cfg(not(windows))]
        let device = "/dev/ttyACM0".to_string();

        Self {
            device,
            baud_rate: 9600,
            log_enabled: false,
            log_file: None,
            error_log_file: PathBuf::from("errorLog"),
            debug: false,
            read_timeout_ms: 500,
            poll_interval_ms: 200,
            distance_min_satellites: DEFAULT_MIN_SATELLITES,
            target: None,
        }
    }

    /// Load configuration from the config file, falling back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::platform_default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| GpsError::Other(format!("Failed to read config file: {}", e)))?;

        Self::from_json(&contents)
    }

    /// Save configuration to the config file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GpsError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| GpsError::Other(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, contents)
            .map_err(|e| GpsError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(config_path)
    }

    /// Parse a JSON config; missing keys take their defaults
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| GpsError::Other(format!("Failed to parse config file: {}", e)))
    }

    /// Get config file path
    fn get_config_path() -> Result<PathBuf> {
        #[cfg(windows)]
        let base = std::env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| GpsError::Other("APPDATA environment variable not set".to_string()))?;

        #[cfg(not(windows))]
        let base = std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .map_err(|_| GpsError::Other("HOME environment variable not set".to_string()))?;

        Ok(base.join("pigps").join("config.json"))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The configured log file, or `gpsLog-<UTC timestamp>.csv`
    pub fn resolved_log_file(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            PathBuf::from(format!("gpsLog-{}.csv", Utc::now().format("%Y-%m-%dT%H-%M-%S")))
        })
    }

    /// Enable fix logging, optionally to a specific file
    pub fn enable_logging(&mut self, log_file: Option<PathBuf>) {
        self.log_enabled = true;
        if log_file.is_some() {
            self.log_file = log_file;
        }
    }
}
