//! Driver registry for pin drivers.
//!
//! Provides a `DriverRegistry` struct for registering and retrieving driver
//! factories. Constructed at startup and passed by value; no global state.

use fess_common::hal::driver::{DriverError, DriverFactory, DriverSettings, IoDriver};
use std::collections::HashMap;

/// Registry of available pin drivers.
pub struct DriverRegistry {
    factories: HashMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a driver factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Get a driver factory by name.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Create the driver named in `settings`.
    ///
    /// # Errors
    /// Returns `DriverError::DriverNotFound` if no driver with that name is
    /// registered, or the factory's own error.
    pub fn create_driver(&self, settings: &DriverSettings) -> Result<Box<dyn IoDriver>, DriverError> {
        let factory = self
            .get_factory(&settings.name)
            .ok_or_else(|| DriverError::DriverNotFound(settings.name.clone()))?;
        factory(settings)
    }

    /// List all registered driver names, sorted.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
