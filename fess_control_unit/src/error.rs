//! Control Unit errors.
//!
//! Only the lifecycle around the loop can fail (config, driver startup and
//! shutdown). The cycle body itself is infallible.

use fess_common::config::ConfigError;
use fess_common::hal::driver::DriverError;
use thiserror::Error;

/// Errors during startup, shutdown, or configuration of the cycle runner.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Configuration could not be loaded or validated.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Driver creation, init or shutdown failed.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// Startup banner could not be written.
    #[error("status channel error: {0}")]
    Status(#[from] std::io::Error),

    /// `step()` or `run()` called before `startup()`.
    #[error("cycle runner not started")]
    NotStarted,
}
