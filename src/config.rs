//! Configuration for the daily timeline viewer.

use crate::render::{TimelineRenderer, DEFAULT_TICK_INTERVAL_HOURS};
use crate::timeline::DEFAULT_DAY_START_HOUR;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CSV file loaded when a command is given no explicit path.
    /// `None` falls back to the bundled sample dataset.
    pub default_dataset: Option<PathBuf>,

    /// Directory rendered charts are written to
    pub export_path: PathBuf,

    /// Hour of day the display window opens at
    pub day_start_hour: u32,

    /// Chart appearance
    pub chart: ChartConfig,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dayline-viewer");

        Self {
            default_dataset: None,
            export_path: data_dir.join("exports"),
            day_start_hour: DEFAULT_DAY_START_HOUR,
            chart: ChartConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dayline-viewer")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.export_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }
}

/// Chart appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: u32,
    pub tick_interval_hours: u32,
    pub dark: bool,
    pub show_labels: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            tick_interval_hours: DEFAULT_TICK_INTERVAL_HOURS,
            dark: false,
            show_labels: true,
        }
    }
}

impl ChartConfig {
    /// Build a renderer reflecting these settings.
    pub fn renderer(&self) -> TimelineRenderer {
        let mut renderer = TimelineRenderer::new()
            .chart_width(self.width)
            .tick_interval_hours(self.tick_interval_hours);
        if self.dark {
            renderer = renderer.dark_theme();
        }
        if !self.show_labels {
            renderer = renderer.hide_labels();
        }
        renderer
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
