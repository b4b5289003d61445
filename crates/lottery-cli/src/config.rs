//! Lottery CLI Configuration Management
//!
//! Configuration is read from a TOML file, looked up in this order:
//! - The path passed with `--config`
//! - `~/.lottery/config.toml`, when it exists
//! - Built-in defaults
//!
//! Command-line flags are applied on top by [`AppConfig::apply_overrides`].
//! Missing keys in a file fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lottery_core::{LotteryConfig, RevealConfig};

// ----------------------------------------------------------------------------
// CLI Application Configuration
// ----------------------------------------------------------------------------

/// Complete configuration for the lottery CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Draw, reveal and export settings shared with the browser widget
    pub lottery: LotteryConfig,

    /// CLI-specific settings
    pub cli: CliConfig,
}

/// CLI-specific configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Prompt shown in interactive mode
    pub prompt: String,

    /// Reveal results one by one using the configured delays
    pub animate: bool,

    /// Directory exports are written to when none is given
    pub export_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prompt: "lottery> ".to_string(),
            animate: true,
            export_dir: None,
        }
    }
}

// ----------------------------------------------------------------------------
// Configuration Loading Logic
// ----------------------------------------------------------------------------

impl AppConfig {
    /// Load from `path` if given, else from the default location if present
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            info!("Loading configuration from: {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.is_file() => {
                info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)
            }
            _ => {
                info!("Using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileSystem(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
            .map_err(|e| match e {
                ConfigError::Loading(msg) => {
                    ConfigError::Loading(format!("Failed to load from {}: {}", path.display(), msg))
                }
                other => other,
            })
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Loading(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration file path (`~/.lottery/config.toml`)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".lottery").join("config.toml"))
    }

    /// Save configuration to a specific file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::FileSystem(format!("Failed to create config directory: {}", e))
            })?;
        }

        std::fs::write(path.as_ref(), self.to_toml()?)
            .map_err(|e| ConfigError::FileSystem(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialization(format!("Failed to serialize config: {}", e)))
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lottery
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.cli.prompt.is_empty() {
            return Err(ConfigError::Validation("cli.prompt must not be empty".to_string()));
        }

        Ok(())
    }

    /// Apply command-line flags that take precedence over the file
    pub fn apply_overrides(&mut self, no_animation: bool) {
        if no_animation {
            debug!("Animation disabled from the command line");
            self.cli.animate = false;
        }
    }

    /// Lottery configuration with the reveal delays the CLI will actually use
    pub fn effective_lottery(&self) -> LotteryConfig {
        let mut lottery = self.lottery.clone();
        if !self.cli.animate {
            lottery.reveal = RevealConfig::instant();
        }
        lottery
    }
}

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {0}")]
    Loading(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
