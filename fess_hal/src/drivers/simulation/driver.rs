//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `IoDriver` trait to provide
//! software-emulated sensor pins for development and bench testing without
//! the flywheel hardware. Input levels are produced from a [`Scenario`]
//! through the pin map, so polarity handling is exercised exactly as it
//! would be on real pins.

use super::scenario::{Scenario, ScenarioPlayer};
use fess_common::hal::driver::{DriverDiagnostics, DriverError, IoDriver};
use fess_common::hal::types::PinBank;
use fess_common::io::registry::IoRegistry;
use fess_common::safety::SensorReading;
use tracing::{debug, info, trace, warn};

/// Simulation driver implementing the IoDriver trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Pin map (set by `init`)
    registry: Option<IoRegistry>,
    /// Scenario label
    scenario_name: String,
    /// Scenario playback
    player: ScenarioPlayer,
    /// Last hazard bits played
    last_reading: SensorReading,
    /// Read/write counters and last outputs
    diag: DriverDiagnostics,
}

impl SimulationDriver {
    /// Create a simulation driver with every sensor idle.
    pub fn new() -> Self {
        Self::with_scenario(&Scenario::idle())
    }

    /// Create a simulation driver playing `scenario`.
    pub fn with_scenario(scenario: &Scenario) -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            registry: None,
            scenario_name: scenario.name.clone(),
            player: ScenarioPlayer::new(scenario),
            last_reading: SensorReading::empty(),
            diag: DriverDiagnostics::default(),
        }
    }

    /// Hazard bits produced on the last read.
    pub fn last_reading(&self) -> SensorReading {
        self.last_reading
    }

    /// Output bank from the last write.
    pub fn last_outputs(&self) -> PinBank {
        self.diag.last_outputs
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl IoDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn init(&mut self, registry: &IoRegistry) -> Result<(), DriverError> {
        if self.registry.is_some() {
            warn!("Simulation driver already initialized, re-initializing");
        }
        self.registry = Some(registry.clone());
        info!(
            "Simulation driver initialized: scenario '{}' ({} steps)",
            self.scenario_name,
            self.player.step_count()
        );
        Ok(())
    }

    fn read_inputs(&mut self) -> PinBank {
        self.diag.reads += 1;
        let Some(registry) = &self.registry else {
            // Not initialized: float every pin low.
            return PinBank::ALL_LOW;
        };

        let step = self.player.step_index();
        let reading = self.player.next_reading();
        if reading != self.last_reading {
            debug!(
                "Simulated sensors {} -> {} (step {})",
                self.last_reading.bit_string(),
                reading.bit_string(),
                step
            );
        }
        self.last_reading = reading;

        let bank = registry.encode_sensors(reading);
        trace!("Simulated input bank {:?}", bank);
        bank
    }

    fn write_outputs(&mut self, outputs: PinBank) {
        self.diag.writes += 1;
        if outputs != self.diag.last_outputs {
            debug!(
                "Simulated outputs {:?} -> {:?}",
                self.diag.last_outputs, outputs
            );
        }
        self.diag.last_outputs = outputs;
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        info!(
            "Simulation driver shutdown after {} reads, {} writes",
            self.diag.reads, self.diag.writes
        );
        self.registry = None;
        Ok(())
    }

    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        Some(DriverDiagnostics {
            custom: Some(format!(
                "scenario '{}' step {}/{}",
                self.scenario_name,
                self.player.step_index() + 1,
                self.player.step_count()
            )),
            ..self.diag.clone()
        })
    }
}
