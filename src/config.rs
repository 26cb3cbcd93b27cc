//! Configuration management for weather-mcp
//!
//! Settings come from built-in defaults, an optional TOML file and
//! `WEATHER_MCP_*` environment overrides. The per-call location defaults
//! (`LOCATION`, `LATITUDE`, `LONGITUDE`) are read separately, see
//! [`LocationDefaults`].

use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "WEATHER_MCP_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Open-Meteo endpoints and HTTP client settings
    pub upstream: UpstreamConfig,
    /// Tool behavior
    pub tools: ToolsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Open-Meteo endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the geocoding API
    pub geocoding_base_url: String,
    /// Base URL of the forecast API
    pub weather_base_url: String,
    /// Request timeout in seconds; unset leaves the transport default
    pub timeout_seconds: Option<u64>,
    /// User agent sent with every request
    pub user_agent: String,
}

/// Which get_weather inputs are honored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Coordinates, place names, `LOCATION`, then `LATITUDE`/`LONGITUDE`
    #[default]
    Extended,
    /// Deprecated narrow variant: coordinates and `LATITUDE`/`LONGITUDE` only
    CoordinatesOnly,
}

/// Tool settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub resolution: ResolutionMode,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_user_agent() -> String {
    format!("weather-mcp/{}", crate::VERSION)
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            weather_base_url: default_weather_base_url(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Configured timeout, if any
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(Self::get_config_path);
        Self::load_from_path(path.as_deref())
    }

    /// Load configuration from the given file (if it exists) and environment
    pub fn load_from_path(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(
                File::from(path)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("WEATHER_MCP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut settings: Settings = builder.build()?.try_deserialize()?;

        settings.apply_defaults();
        settings.validate()?;

        Ok(settings)
    }

    /// Default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-mcp").join("config.toml"))
    }

    /// Fill in blank string fields
    pub fn apply_defaults(&mut self) {
        if self.upstream.geocoding_base_url.is_empty() {
            self.upstream.geocoding_base_url = default_geocoding_base_url();
        }
        if self.upstream.weather_base_url.is_empty() {
            self.upstream.weather_base_url = default_weather_base_url();
        }
        if self.upstream.user_agent.is_empty() {
            self.upstream.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = LoggingConfig::default().level;
        }
        if self.logging.format.is_empty() {
            self.logging.format = LoggingConfig::default().format;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, url) in [
            ("upstream.geocoding_base_url", &self.upstream.geocoding_base_url),
            ("upstream.weather_base_url", &self.upstream.weather_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::invalid(format!(
                    "{key} must be an HTTP or HTTPS URL, got '{url}'"
                )));
            }
        }

        if let Some(timeout) = self.upstream.timeout_seconds {
            if timeout == 0 || timeout > 300 {
                return Err(ConfigError::invalid(
                    "upstream.timeout_seconds must be between 1 and 300",
                ));
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            )));
        }

        Ok(())
    }
}

/// Fallback inputs for get_weather, read from the process environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDefaults {
    /// `LOCATION`: place name, takes precedence over coordinates
    pub location: Option<String>,
    /// `LATITUDE`, unparsed
    pub latitude: Option<String>,
    /// `LONGITUDE`, unparsed
    pub longitude: Option<String>,
}

impl LocationDefaults {
    /// Snapshot the environment. Called once per tool invocation.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            location: std::env::var("LOCATION").ok(),
            latitude: std::env::var("LATITUDE").ok(),
            longitude: std::env::var("LONGITUDE").ok(),
        }
    }
}
