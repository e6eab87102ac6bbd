//! Application configuration
//!
//! Values come from an optional TOML file; command-line flags override
//! them afterwards.
//!
//! ```toml
//! checkpoint = "models/region_grow.toml"
//! model_variant = "region_grow"
//! max_image_size = 2048
//! log_file = "geosegment.log"
//! log_level = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use log::{debug, LevelFilter};

use crate::errors::{GeoSegError, GeoSegResult};
use crate::raster::DEFAULT_MAX_IMAGE_SIZE;

pub const DEFAULT_CHECKPOINT: &str = "models/region_grow.toml";
pub const DEFAULT_MODEL_VARIANT: &str = "region_grow";
pub const DEFAULT_LOG_FILE: &str = "geosegment.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub checkpoint: PathBuf,
    pub model_variant: String,
    pub max_image_size: usize,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            checkpoint: PathBuf::from(DEFAULT_CHECKPOINT),
            model_variant: DEFAULT_MODEL_VARIANT.to_string(),
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Reads a configuration file
    pub fn from_file(path: &Path) -> GeoSegResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| GeoSegError::config(path, e))?;
        Self::from_toml(&content).map_err(|reason| GeoSegError::config(path, reason))
    }

    /// Defaults, or the file's values when a path is given
    pub fn load(path: Option<&Path>) -> GeoSegResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parses configuration text; keys not present keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let document: toml::Table = content.parse()
            .map_err(|e| format!("Failed to parse TOML: {}", e))?;
        let mut config = Self::default();

        for (key, value) in &document {
            match key.as_str() {
                "checkpoint" => config.checkpoint = PathBuf::from(Self::string(key, value)?),
                "model_variant" => config.model_variant = Self::string(key, value)?.to_string(),
                "max_image_size" => {
                    config.max_image_size = value.as_integer()
                        .and_then(|v| usize::try_from(v).ok())
                        .ok_or_else(|| format!("max_image_size must be a positive integer, got {}", value))?;
                },
                "log_file" => config.log_file = PathBuf::from(Self::string(key, value)?),
                "log_level" => config.log_level = parse_level(Self::string(key, value)?)?,
                other => debug!("Ignoring unknown configuration key {}", other),
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn string<'a>(key: &str, value: &'a toml::Value) -> Result<&'a str, String> {
        value.as_str().ok_or_else(|| format!("{} must be a string, got {}", key, value))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_image_size == 0 {
            return Err("max_image_size must be at least 1".to_string());
        }
        if self.model_variant.trim().is_empty() {
            return Err("model_variant must not be empty".to_string());
        }
        Ok(())
    }
}

/// Parses a log level name such as `info` or `DEBUG`
pub fn parse_level(name: &str) -> Result<LevelFilter, String> {
    name.trim().parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level {}", name))
}
