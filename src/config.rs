//! Configuration management for the `MuseTrip` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::MuseTripError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `MuseTrip` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuseTripConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Museum data provider settings
    #[serde(default)]
    pub museums: MuseumProviderConfig,
    /// IP-geolocation provider settings
    #[serde(default)]
    pub geolocation: GeolocationConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Listen port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Museum data provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuseumProviderConfig {
    /// Base URL of the museum data API
    #[serde(default = "default_museums_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// IP-geolocation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    /// Base URL of the IP-geolocation API
    #[serde(default = "default_geolocation_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
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

// Default value functions
fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_museums_base_url() -> String {
    "https://historyproject.somee.com/api".to_string()
}

fn default_geolocation_base_url() -> String {
    "https://ipinfo.io".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for MuseumProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_museums_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            base_url: default_geolocation_base_url(),
            timeout_seconds: default_timeout(),
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

impl Default for MuseTripConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            museums: MuseumProviderConfig::default(),
            geolocation: GeolocationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MuseTripConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with MUSETRIP_ prefix,
        // e.g. MUSETRIP_SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("MUSETRIP")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: MuseTripConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Address the HTTP server should bind to
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.museums.timeout_seconds == 0 || self.museums.timeout_seconds > 300 {
            return Err(MuseTripError::config(
                "Museum provider timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.geolocation.timeout_seconds == 0 || self.geolocation.timeout_seconds > 300 {
            return Err(MuseTripError::config(
                "Geolocation provider timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(MuseTripError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(MuseTripError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, base_url) in [
            ("Museum provider", &self.museums.base_url),
            ("Geolocation provider", &self.geolocation.base_url),
        ] {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(MuseTripError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.server.host.is_empty() {
            return Err(MuseTripError::config("Server host cannot be empty").into());
        }

        Ok(())
    }
}
