//! Prelude module for common re-exports.
//!
//! ```rust
//! use fess_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, FessConfig, LogLevel, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{CYCLE_PERIOD, CYCLE_PERIOD_MS, STARTUP_BANNER};

// ─── Safety Types ───────────────────────────────────────────────────
pub use crate::safety::{ActuatorCommand, SensorReading, SystemState};

// ─── I/O ────────────────────────────────────────────────────────────
pub use crate::io::config::IoConfig;
pub use crate::io::registry::IoRegistry;
pub use crate::io::role::{IoRole, PinLogic};

// ─── Drivers ────────────────────────────────────────────────────────
pub use crate::hal::driver::{DriverError, DriverSettings, IoDriver};
pub use crate::hal::types::PinBank;
