//! I/O pin map configuration.
//!
//! Deserialized from the `[io]` table of `fess.toml` (or a standalone
//! `io.toml`). Each direction holds an array of points binding a role to a
//! pin with an electrical polarity.
//!
//! # TOML Example
//!
//! ```toml
//! [[di]]
//! role = "Speed"
//! pin = 2
//! logic = "active_low"
//! name = "Rotary encoder overspeed"
//!
//! [[do]]
//! role = "Balance"
//! pin = 8
//! ```

use serde::{Deserialize, Serialize};

use super::role::{IoDirection, IoRole, PinLogic};

/// A single I/O point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoPoint {
    /// Functional role of the pin.
    pub role: IoRole,
    /// Physical pin number (0..64).
    pub pin: u16,
    /// Electrical polarity. Defaults per direction: DI active-low, DO active-high.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<PinLogic>,
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IoPoint {
    fn new(role: IoRole, pin: u16, name: &str) -> Self {
        Self {
            role,
            pin,
            logic: None,
            name: Some(name.to_string()),
        }
    }

    /// Polarity with the per-direction default applied.
    pub fn logic_for(&self, direction: IoDirection) -> PinLogic {
        self.logic.unwrap_or(match direction {
            IoDirection::Di => PinLogic::ActiveLow,
            IoDirection::Do => PinLogic::ActiveHigh,
        })
    }
}

/// Complete I/O pin map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    /// Digital inputs (threat sensors).
    #[serde(default)]
    pub di: Vec<IoPoint>,
    /// Digital outputs (actuators and indicators).
    #[serde(default, rename = "do")]
    pub outputs: Vec<IoPoint>,
}

impl IoConfig {
    /// Parse an I/O configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Reference controller wiring: sensors on pins 2–7, actuators on
    /// 8–13, siren on 14 and warning light on 15.
    pub fn default_pin_map() -> Self {
        Self {
            di: vec![
                IoPoint::new(IoRole::Speed, 2, "Rotary encoder overspeed"),
                IoPoint::new(IoRole::Vibration, 3, "Accelerometer vibration"),
                IoPoint::new(IoRole::Thermal, 4, "Thermal camera overheat"),
                IoPoint::new(IoRole::Vacuum, 5, "Pirani gauge vacuum loss"),
                IoPoint::new(IoRole::Strain, 6, "Strain gauge"),
                IoPoint::new(IoRole::Acoustic, 7, "Acoustic crack emission"),
            ],
            outputs: vec![
                IoPoint::new(IoRole::Balance, 8, "Magnetic bearing"),
                IoPoint::new(IoRole::TorqueBrake, 9, "Torque reduction"),
                IoPoint::new(IoRole::Damper, 10, "Piezo damper"),
                IoPoint::new(IoRole::EmergencyBrake, 11, "Emergency brake"),
                IoPoint::new(IoRole::Cooling, 12, "Cooling fan"),
                IoPoint::new(IoRole::RegenBrake, 13, "Regenerative brake"),
                IoPoint::new(IoRole::Siren, 14, "Siren"),
                IoPoint::new(IoRole::WarningLight, 15, "Warning light"),
            ],
        }
    }

    /// Iterate all points with their direction.
    pub fn all_points(&self) -> impl Iterator<Item = (IoDirection, &IoPoint)> {
        self.di
            .iter()
            .map(|p| (IoDirection::Di, p))
            .chain(self.outputs.iter().map(|p| (IoDirection::Do, p)))
    }
}

impl Default for IoConfig {
    fn default() -> Self {
        Self::default_pin_map()
    }
}
