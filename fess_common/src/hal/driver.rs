//! I/O driver trait and error types.
//!
//! This module defines:
//! - `IoDriver` trait - Interface for pluggable pin drivers
//! - `DriverError` enum - Error types for driver operations
//! - `DriverFactory` type alias - Factory function type
//! - `DriverSettings` struct - Driver selection from config
//! - `DriverDiagnostics` struct - Optional driver diagnostics

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::hal::types::PinBank;
use crate::io::registry::IoRegistry;

/// Error types for driver operations.
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// Driver initialization failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Scenario file could not be loaded
    #[error("Scenario error: {0}")]
    ScenarioError(String),
}

/// Driver selection, the `[driver]` table of `fess.toml`.
///
/// # TOML Example
///
/// ```toml
/// [driver]
/// name = "simulation"
/// scenario = "scenarios/escalation.toml"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverSettings {
    /// Registered driver name.
    #[serde(default = "default_driver_name")]
    pub name: String,

    /// Scenario file for the simulation driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<PathBuf>,
}

fn default_driver_name() -> String {
    "simulation".to_string()
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            name: default_driver_name(),
            scenario: None,
        }
    }
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn(&DriverSettings) -> Result<Box<dyn IoDriver>, DriverError>;

/// Optional driver diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverDiagnostics {
    /// Number of input reads
    pub reads: u64,
    /// Number of output writes
    pub writes: u64,
    /// Last output bank written
    pub last_outputs: PinBank,
    /// Driver-specific detail
    pub custom: Option<String>,
}

/// Trait defining the interface for pin drivers.
///
/// The Control Unit manages drivers through this trait, enabling pluggable
/// backends (simulation, GPIO character device, fieldbus, etc.).
///
/// # Lifecycle
///
/// 1. `init()` - Called once before the loop starts
/// 2. `read_inputs()` / `write_outputs()` - Called once each per cycle
/// 3. `shutdown()` - Called when the loop stops
///
/// Per-cycle calls are infallible: the safety loop has no recovery path
/// for pin I/O, so a driver reports electrical trouble through its own
/// diagnostics rather than by failing a cycle.
pub trait IoDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Initialize the driver with the validated pin map.
    ///
    /// # Errors
    /// Return `DriverError::InitFailed` if initialization cannot complete.
    fn init(&mut self, registry: &IoRegistry) -> Result<(), DriverError>;

    /// Sample the electrical level of every input pin.
    fn read_inputs(&mut self) -> PinBank;

    /// Drive every output pin to the given level.
    fn write_outputs(&mut self, outputs: PinBank);

    /// Graceful shutdown of the driver.
    fn shutdown(&mut self) -> Result<(), DriverError>;

    /// Get driver-specific diagnostics.
    /// Default: None
    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        None
    }
}
