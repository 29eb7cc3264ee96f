//! Safety domain types shared by the HAL and the Control Unit.
//!
//! - [`SensorReading`] - the six threat sensor bits sampled each cycle.
//! - [`SystemState`] - the three-level severity carried across cycles.
//! - [`ActuatorCommand`] - the six actuator and two indicator outputs.
//!
//! Sensor bit order (S1..S6) is fixed: Speed, Vibration, Thermal, Vacuum,
//! Strain, Acoustic. The status line prints the bits in that order.

use bitflags::bitflags;
use core::fmt;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

use crate::consts::{ACTUATOR_COUNT, SENSOR_COUNT};
use crate::io::role::IoRole;

// ─── SensorReading ──────────────────────────────────────────────────

bitflags! {
    /// Logical hazard bits for one polling cycle (`true` = hazard present).
    ///
    /// Created and discarded within one cycle; no history is kept.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SensorReading: u8 {
        /// S1: rotor overspeed (rotary encoder).
        const SPEED     = 0x01;
        /// S2: vibration above limit (accelerometer).
        const VIBRATION = 0x02;
        /// S3: overheat (thermal camera).
        const THERMAL   = 0x04;
        /// S4: vacuum loss (Pirani gauge).
        const VACUUM    = 0x08;
        /// S5: rotor strain (strain gauge).
        const STRAIN    = 0x10;
        /// S6: crack emission (acoustic sensor).
        const ACOUSTIC  = 0x20;
    }
}

const_assert_eq!(core::mem::size_of::<SensorReading>(), 1);

impl SensorReading {
    /// Sensor flags in S1..S6 order.
    pub const ORDERED: [Self; SENSOR_COUNT] = [
        Self::SPEED,
        Self::VIBRATION,
        Self::THERMAL,
        Self::VACUUM,
        Self::STRAIN,
        Self::ACOUSTIC,
    ];

    /// Build a reading from six booleans in S1..S6 order.
    pub const fn from_bools(s: [bool; SENSOR_COUNT]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < SENSOR_COUNT {
            if s[i] {
                bits |= 1 << i;
            }
            i += 1;
        }
        Self::from_bits_truncate(bits)
    }

    /// The six booleans in S1..S6 order.
    pub const fn to_bools(self) -> [bool; SENSOR_COUNT] {
        let b = self.bits();
        [
            b & 0x01 != 0,
            b & 0x02 != 0,
            b & 0x04 != 0,
            b & 0x08 != 0,
            b & 0x10 != 0,
            b & 0x20 != 0,
        ]
    }

    /// Six-character `0`/`1` string in S1..S6 order, e.g. `"101000"`.
    pub fn bit_string(self) -> heapless::String<6> {
        let mut out = heapless::String::new();
        for flag in Self::ORDERED {
            let _ = out.push(if self.contains(flag) { '1' } else { '0' });
        }
        out
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::empty()
    }
}

// ─── SystemState ────────────────────────────────────────────────────

/// Severity classifier state.
///
/// The only value carried from one cycle to the next. No terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SystemState {
    /// No hazard present; all actuators held off.
    Normal = 0,
    /// At least one hazard present.
    Warning = 1,
    /// All six hazards present simultaneously.
    Crisis = 2,
}

const_assert_eq!(core::mem::size_of::<SystemState>(), 1);

impl SystemState {
    /// All states in ascending severity.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Warning, Self::Crisis];

    /// Upper-case label used on the status channel.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Warning => "WARNING",
            Self::Crisis => "CRISIS",
        }
    }

    /// Whether actuators may be engaged in this state.
    #[inline]
    pub const fn is_safe_to_act(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ─── ActuatorCommand ────────────────────────────────────────────────

/// Output levels for one cycle (`true` = engage / indicator on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActuatorCommand {
    /// A1: magnetic bearing (active balancing).
    pub balance: bool,
    /// A2: motor torque reduction.
    pub torque_brake: bool,
    /// A3: piezo vibration damper.
    pub damper: bool,
    /// A4: emergency brake.
    pub emergency_brake: bool,
    /// A5: cooling fan.
    pub cooling: bool,
    /// A6: regenerative brake.
    pub regen_brake: bool,
    /// Siren indicator.
    pub siren: bool,
    /// Warning light indicator.
    pub warning_light: bool,
}

const_assert_eq!(core::mem::size_of::<ActuatorCommand>(), 8);

impl ActuatorCommand {
    /// Every output off. Driven once at startup before the first cycle.
    pub const ALL_OFF: Self = Self {
        balance: false,
        torque_brake: false,
        damper: false,
        emergency_brake: false,
        cooling: false,
        regen_brake: false,
        siren: false,
        warning_light: false,
    };

    /// The six actuator levels (indicators excluded) in A1..A6 order.
    pub const fn actuators(&self) -> [bool; ACTUATOR_COUNT] {
        [
            self.balance,
            self.torque_brake,
            self.damper,
            self.emergency_brake,
            self.cooling,
            self.regen_brake,
        ]
    }

    /// Level of the output bound to `role`. `None` for sensor roles.
    pub const fn level(&self, role: IoRole) -> Option<bool> {
        match role {
            IoRole::Balance => Some(self.balance),
            IoRole::TorqueBrake => Some(self.torque_brake),
            IoRole::Damper => Some(self.damper),
            IoRole::EmergencyBrake => Some(self.emergency_brake),
            IoRole::Cooling => Some(self.cooling),
            IoRole::RegenBrake => Some(self.regen_brake),
            IoRole::Siren => Some(self.siren),
            IoRole::WarningLight => Some(self.warning_light),
            _ => None,
        }
    }

    /// Set the output bound to `role`. Sensor roles are ignored.
    pub fn set_level(&mut self, role: IoRole, value: bool) {
        match role {
            IoRole::Balance => self.balance = value,
            IoRole::TorqueBrake => self.torque_brake = value,
            IoRole::Damper => self.damper = value,
            IoRole::EmergencyBrake => self.emergency_brake = value,
            IoRole::Cooling => self.cooling = value,
            IoRole::RegenBrake => self.regen_brake = value,
            IoRole::Siren => self.siren = value,
            IoRole::WarningLight => self.warning_light = value,
            _ => {}
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
