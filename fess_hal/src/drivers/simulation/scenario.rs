//! Sensor scenarios for the simulation driver.
//!
//! A scenario is an ordered list of steps, each holding a set of active
//! hazard roles for a number of cycles.
//!
//! ```toml
//! name = "overheat"
//! repeat = false
//!
//! [[step]]
//! cycles = 10
//! active = []
//!
//! [[step]]
//! cycles = 5
//! active = ["Thermal"]
//! ```
//!
//! When a non-repeating scenario runs out, the last step is held.

use fess_common::io::role::IoRole;
use fess_common::safety::SensorReading;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scenario loading / validation error.
#[derive(Debug, Clone, Error)]
pub enum ScenarioError {
    /// File could not be read.
    #[error("cannot read scenario {}: {reason}", .path.display())]
    Read {
        /// Scenario file path.
        path: PathBuf,
        /// Underlying I/O error.
        reason: String,
    },
    /// TOML parsing failed.
    #[error("cannot parse scenario: {0}")]
    Parse(String),
    /// A step lasts zero cycles.
    #[error("step {index} has zero cycles")]
    EmptyStep {
        /// Zero-based step index.
        index: usize,
    },
    /// A step activates a role that is not a sensor.
    #[error("step {index} activates output role '{role}'")]
    NotASensor {
        /// Zero-based step index.
        index: usize,
        /// Offending role.
        role: IoRole,
    },
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioStep {
    /// Number of cycles this step lasts.
    pub cycles: u32,
    /// Sensor roles reporting a hazard during this step.
    #[serde(default)]
    pub active: Vec<IoRole>,
}

impl ScenarioStep {
    /// Hazard bits for this step. Non-sensor roles are ignored.
    pub fn reading(&self) -> SensorReading {
        self.active
            .iter()
            .filter_map(|role| role.sensor_flag())
            .fold(SensorReading::empty(), |acc, flag| acc | flag)
    }
}

/// A named sequence of sensor steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Scenario label for logs.
    #[serde(default)]
    pub name: String,
    /// Restart from the first step after the last one.
    #[serde(default)]
    pub repeat: bool,
    /// Ordered steps.
    #[serde(default, rename = "step")]
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Every sensor idle, forever.
    pub fn idle() -> Self {
        Self {
            name: "idle".to_string(),
            repeat: false,
            steps: Vec::new(),
        }
    }

    /// Parse and validate a scenario from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ScenarioError> {
        let scenario: Self =
            toml::from_str(toml_str).map_err(|e| ScenarioError::Parse(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScenarioError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut scenario = Self::from_toml(&content)?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }

    /// Reject zero-length steps and output roles.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (index, step) in self.steps.iter().enumerate() {
            if step.cycles == 0 {
                return Err(ScenarioError::EmptyStep { index });
            }
            if let Some(role) = step.active.iter().find(|r| r.sensor_flag().is_none()) {
                return Err(ScenarioError::NotASensor { index, role: *role });
            }
        }
        Ok(())
    }

    /// Total cycles of one pass through all steps.
    pub fn total_cycles(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.cycles)).sum()
    }
}

/// Cycle-by-cycle playback of a [`Scenario`]. Allocation-free after construction.
#[derive(Debug, Clone)]
pub struct ScenarioPlayer {
    steps: Vec<(SensorReading, u32)>,
    repeat: bool,
    index: usize,
    elapsed: u32,
}

impl ScenarioPlayer {
    /// Build a player from a validated scenario.
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            steps: scenario
                .steps
                .iter()
                .map(|s| (s.reading(), s.cycles))
                .collect(),
            repeat: scenario.repeat,
            index: 0,
            elapsed: 0,
        }
    }

    /// Index of the step that the next call to [`next_reading`](Self::next_reading) plays.
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Reading for the next cycle.
    pub fn next_reading(&mut self) -> SensorReading {
        let Some(&(reading, cycles)) = self.steps.get(self.index) else {
            return SensorReading::empty();
        };

        self.elapsed += 1;
        if self.elapsed >= cycles {
            let last = self.index + 1 == self.steps.len();
            if !last {
                self.index += 1;
                self.elapsed = 0;
            } else if self.repeat {
                self.index = 0;
                self.elapsed = 0;
            } else {
                // Hold the last step.
                self.elapsed = cycles;
            }
        }
        reading
    }
}
