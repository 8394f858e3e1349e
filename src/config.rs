//! Configuration management for the `Tripsmith` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripsmithError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Tripsmith` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripsmithConfig {
    /// Chat backend configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default application settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Chat backend configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the chat completion backend
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Trip length used when none is given
    #[serde(default = "default_days")]
    pub days: u32,
}

// Default value functions
fn default_llm_base_url() -> String {
    "https://api.deepseek.com/v1".to_string()
}

fn default_llm_model() -> String {
    "deepseek-chat".to_string()
}

fn default_llm_temperature() -> f32 {
    0.7
}

fn default_llm_timeout() -> u32 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_days() -> u32 {
    3
}

impl Default for TripsmithConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
        }
    }
}

impl TripsmithConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRIPSMITH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPSMITH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripsmithConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripsmith").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.llm.base_url.is_empty() {
            self.llm.base_url = default_llm_base_url();
        }
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.days == 0 {
            self.defaults.days = default_days();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the backend API key, if one is configured
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.llm.api_key {
            if api_key.is_empty() {
                return Err(TripsmithError::config(
                    "Chat backend API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(TripsmithError::config(
                    "Chat backend API key appears to be invalid (too short). Please check your API key."
                ).into());
            }

            if api_key.len() > 200 {
                return Err(TripsmithError::config(
                    "Chat backend API key appears to be invalid (too long). Please check your API key."
                ).into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(
                TripsmithError::config("Sampling temperature must be between 0.0 and 2.0").into(),
            );
        }

        if self.llm.timeout_seconds > 600 {
            return Err(
                TripsmithError::config("Chat backend timeout cannot exceed 600 seconds").into(),
            );
        }

        if self.defaults.days > 10 {
            return Err(TripsmithError::config("Default trip length cannot exceed 10 days").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripsmithError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripsmithError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.llm.base_url.starts_with("http://") && !self.llm.base_url.starts_with("https://") {
            return Err(TripsmithError::config(
                "Chat backend base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    /// Create configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let tripsmith_config_dir = config_dir.join("tripsmith");
            std::fs::create_dir_all(&tripsmith_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    tripsmith_config_dir.display()
                )
            })?;
            Ok(tripsmith_config_dir)
        } else {
            Err(TripsmithError::config("Unable to determine config directory").into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TripsmithConfig::default();
        assert_eq!(config.llm.base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.llm.model, "deepseek-chat");
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.llm.timeout_seconds, 120);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.days, 3);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_config_validation_missing_api_key() {
        let config = TripsmithConfig::default();
        // API key is optional at load time; the client requires it later
        assert!(config.validate_api_key().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = TripsmithConfig::default();
        config.llm.api_key = Some("short".to_string());
        let result = config.validate_api_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripsmithConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid log level")
        );
    }

    #[test]
    fn test_config_validation_temperature_range() {
        let mut config = TripsmithConfig::default();
        config.llm.temperature = 3.5;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("temperature"));
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = TripsmithConfig::default();
        config.llm.base_url = "ftp://example.com".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "[llm]\napi_key = \"test_key_12345678\"\nmodel = \"deepseek-reasoner\"\n"
        )
        .unwrap();

        let config = TripsmithConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.api_key, Some("test_key_12345678".to_string()));
        assert_eq!(config.llm.model, "deepseek-reasoner");
        // Untouched sections fall back to defaults
        assert_eq!(config.llm.base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.defaults.days, 3);
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripsmithConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripsmith"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
