//! Pin driver implementations.
//!
//! - [`simulation`] - Software simulation driver for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `IoDriver` trait from `fess_common::hal::driver`
//! 3. Register its factory in [`builtin_registry`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Build a registry holding every built-in driver.
pub fn builtin_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    registry.register("simulation", simulation::create_driver);
    registry
}
