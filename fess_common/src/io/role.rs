//! I/O Role types.
//!
//! `IoRole` maps a string like `"Thermal"` to a typed enum variant. Used by
//! both the HAL and the Control Unit to resolve I/O points by functional
//! role rather than pin number.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::consts::{OUTPUT_COUNT, SENSOR_COUNT};
use crate::safety::SensorReading;

// ─── IoDirection ────────────────────────────────────────────────────

/// I/O point direction discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum IoDirection {
    Di = 0,
    Do = 1,
}

impl fmt::Display for IoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Di => write!(f, "di"),
            Self::Do => write!(f, "do"),
        }
    }
}

// ─── PinLogic ───────────────────────────────────────────────────────

/// Electrical polarity of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PinLogic {
    /// High level = logically active.
    ActiveHigh = 0,
    /// Low level = logically active (pulled high when idle).
    ActiveLow = 1,
}

impl PinLogic {
    /// Logical value for an electrical level.
    #[inline]
    pub const fn decode(self, level: bool) -> bool {
        match self {
            Self::ActiveHigh => level,
            Self::ActiveLow => !level,
        }
    }

    /// Electrical level for a logical value.
    #[inline]
    pub const fn encode(self, active: bool) -> bool {
        match self {
            Self::ActiveHigh => active,
            Self::ActiveLow => !active,
        }
    }
}

// ─── IoRole ─────────────────────────────────────────────────────────

/// Functional I/O role of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IoRole {
    // ── Threat sensors (DI) ─────────
    Speed,
    Vibration,
    Thermal,
    Vacuum,
    Strain,
    Acoustic,

    // ── Safety actuators (DO) ───────
    Balance,
    TorqueBrake,
    Damper,
    EmergencyBrake,
    Cooling,
    RegenBrake,

    // ── Indicators (DO) ─────────────
    Siren,
    WarningLight,
}

impl IoRole {
    /// Sensor roles in S1..S6 order.
    pub const SENSORS: [Self; SENSOR_COUNT] = [
        Self::Speed,
        Self::Vibration,
        Self::Thermal,
        Self::Vacuum,
        Self::Strain,
        Self::Acoustic,
    ];

    /// Output roles: actuators A1..A6 followed by the two indicators.
    pub const OUTPUTS: [Self; OUTPUT_COUNT] = [
        Self::Balance,
        Self::TorqueBrake,
        Self::Damper,
        Self::EmergencyBrake,
        Self::Cooling,
        Self::RegenBrake,
        Self::Siren,
        Self::WarningLight,
    ];

    /// Direction this role must be bound to.
    pub const fn direction(self) -> IoDirection {
        match self {
            Self::Speed
            | Self::Vibration
            | Self::Thermal
            | Self::Vacuum
            | Self::Strain
            | Self::Acoustic => IoDirection::Di,
            _ => IoDirection::Do,
        }
    }

    /// Sensor flag for this role, or `None` for output roles.
    pub const fn sensor_flag(self) -> Option<SensorReading> {
        match self {
            Self::Speed => Some(SensorReading::SPEED),
            Self::Vibration => Some(SensorReading::VIBRATION),
            Self::Thermal => Some(SensorReading::THERMAL),
            Self::Vacuum => Some(SensorReading::VACUUM),
            Self::Strain => Some(SensorReading::STRAIN),
            Self::Acoustic => Some(SensorReading::ACOUSTIC),
            _ => None,
        }
    }

    /// Canonical role string as used in TOML.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Vibration => "Vibration",
            Self::Thermal => "Thermal",
            Self::Vacuum => "Vacuum",
            Self::Strain => "Strain",
            Self::Acoustic => "Acoustic",
            Self::Balance => "Balance",
            Self::TorqueBrake => "TorqueBrake",
            Self::Damper => "Damper",
            Self::EmergencyBrake => "EmergencyBrake",
            Self::Cooling => "Cooling",
            Self::RegenBrake => "RegenBrake",
            Self::Siren => "Siren",
            Self::WarningLight => "WarningLight",
        }
    }
}

impl fmt::Display for IoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IoRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SENSORS
            .into_iter()
            .chain(Self::OUTPUTS)
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown IoRole: {s:?}"))
    }
}

impl TryFrom<String> for IoRole {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<IoRole> for String {
    fn from(role: IoRole) -> Self {
        role.as_str().to_string()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
