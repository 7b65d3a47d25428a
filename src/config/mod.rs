//! Configuration for the promptwise CLI
//!
//! Supports configuration via:
//! 1. Config file (~/.config/promptwise/config.toml)
//! 2. Environment variables (PROMPTWISE_DOMAIN, PROMPTWISE_REQUESTS_PER_MONTH)
//!
//! Only CLI defaults live here. Rule tables, weight profiles, and the
//! pricing table are fixed, versioned data and are not configurable.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Domain profile used when none is given on the command line
    pub default_domain: String,

    /// Monthly request volume assumed for savings projections
    pub requests_per_month: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_domain: "general".to_string(),
            requests_per_month: 1000,
        }
    }
}

impl Config {
    /// Get default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptwise")
            .join("config.toml")
    }

    /// Load config from default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::default_path())
    }

    /// Load config from specific path, falling back to defaults when the
    /// file does not exist
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default().with_env_overrides());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(domain) = std::env::var("PROMPTWISE_DOMAIN") {
            self.default_domain = domain;
        }
        if let Ok(requests) = std::env::var("PROMPTWISE_REQUESTS_PER_MONTH") {
            if let Ok(requests) = requests.parse() {
                self.requests_per_month = requests;
            }
        }

        self
    }

    /// Save config to default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path())
    }

    /// Save config to specific path
    pub fn save_to(&self, path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Generate example config content
    pub fn example() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_domain, "general");
        assert_eq!(config.requests_per_month, 1000);
    }

    #[test]
    fn test_example_config() {
        let example = Config::example();
        assert!(example.contains("default_domain"));
        assert!(example.contains("requests_per_month"));
    }

    #[test]
    fn test_partial_config_parses_with_defaults() {
        let config: Config = toml::from_str("default_domain = \"coding\"").unwrap();
        assert_eq!(config.default_domain, "coding");
        assert_eq!(config.requests_per_month, 1000);
    }
}
