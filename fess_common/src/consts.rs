//! Fixed system constants.

use std::time::Duration;

/// Polling period of the safety loop in milliseconds.
pub const CYCLE_PERIOD_MS: u64 = 50;

/// Polling period of the safety loop.
///
/// Compile-time constant: the period is not configurable at runtime.
pub const CYCLE_PERIOD: Duration = Duration::from_millis(CYCLE_PERIOD_MS);

/// Banner emitted once on the status channel after startup.
pub const STARTUP_BANNER: &str = "FESS SAFETY MONITOR READY";

/// Number of threat sensors.
pub const SENSOR_COUNT: usize = 6;

/// Number of safety actuators (indicators excluded).
pub const ACTUATOR_COUNT: usize = 6;

/// Number of output pins: the actuators plus siren and warning light.
pub const OUTPUT_COUNT: usize = ACTUATOR_COUNT + 2;

/// Number of addressable pins per direction (one `u64` bank).
pub const MAX_PINS: u16 = 64;
