//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! for the safety monitor and its tools.
//!
//! # Usage
//!
//! ```rust,no_run
//! use fess_common::config::{ConfigError, FessConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = FessConfig::load_validated(Path::new("config/fess.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::hal::driver::DriverSettings;
use crate::io::config::IoConfig;
use crate::io::registry::IoRegistry;

/// Error type for configuration loading operations.
///
/// This enum represents all possible errors that can occur when loading
/// configuration files.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Represents the verbosity level of logging output.
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "fess-monitor-01"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: "fess-monitor".to_string(),
        }
    }
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── FessConfig ─────────────────────────────────────────────────────

/// Top-level monitor configuration (`fess.toml`).
///
/// Every table is optional; an empty file yields the built-in defaults
/// (simulation driver, reference pin map).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FessConfig {
    /// Service identity and log level.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Driver selection.
    #[serde(default)]
    pub driver: DriverSettings,

    /// Pin map. The reference wiring is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io: Option<IoConfig>,
}

impl FessConfig {
    /// Load, resolve relative paths against the file's directory, and validate.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        if let (Some(scenario), Some(dir)) = (config.driver.scenario.as_mut(), path.parent()) {
            if scenario.is_relative() {
                *scenario = dir.join(&*scenario);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections, including the pin map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if self.driver.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "driver.name cannot be empty".to_string(),
            ));
        }
        self.registry()?;
        Ok(())
    }

    /// Build the I/O registry from the configured (or default) pin map.
    pub fn registry(&self) -> Result<IoRegistry, ConfigError> {
        match &self.io {
            Some(io) => IoRegistry::from_config(io)
                .map_err(|e| ConfigError::ValidationError(format!("io: {e}"))),
            None => Ok(IoRegistry::default()),
        }
    }
}
