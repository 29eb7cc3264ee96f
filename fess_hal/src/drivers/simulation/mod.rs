//! Software simulation driver.
//!
//! - [`driver`] - `SimulationDriver` (the `IoDriver` implementation)
//! - [`scenario`] - TOML sensor scenarios and their playback

pub mod driver;
pub mod scenario;

pub use driver::SimulationDriver;
pub use scenario::{Scenario, ScenarioError, ScenarioPlayer, ScenarioStep};

use fess_common::hal::driver::{DriverError, DriverSettings, IoDriver};
use tracing::info;

/// Factory function for the simulation driver.
///
/// Loads `settings.scenario` when set, otherwise holds every sensor idle.
pub fn create_driver(settings: &DriverSettings) -> Result<Box<dyn IoDriver>, DriverError> {
    let scenario = match &settings.scenario {
        Some(path) => {
            let scenario = Scenario::load(path)
                .map_err(|e| DriverError::ScenarioError(e.to_string()))?;
            info!(
                "Loaded scenario '{}' from {} ({} steps, {} cycles per pass)",
                scenario.name,
                path.display(),
                scenario.steps.len(),
                scenario.total_cycles()
            );
            scenario
        }
        None => Scenario::idle(),
    };
    Ok(Box::new(SimulationDriver::with_scenario(&scenario)))
}
