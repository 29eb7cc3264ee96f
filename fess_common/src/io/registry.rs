//! I/O Registry: role-based pin access.
//!
//! Built at startup from `IoConfig`. Immutable after construction.
//! Bindings are stored in fixed role order so the per-cycle decode and
//! encode paths are plain array walks with no heap allocation.

use thiserror::Error;

use super::config::IoConfig;
use super::role::{IoDirection, IoRole, PinLogic};
use crate::consts::{MAX_PINS, OUTPUT_COUNT, SENSOR_COUNT};
use crate::hal::types::PinBank;
use crate::safety::{ActuatorCommand, SensorReading};

// ─── Error Types ────────────────────────────────────────────────────

/// I/O configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoConfigError {
    /// Two points of the same direction share a pin.
    #[error("duplicate pin ({direction}, {pin}) for roles '{role_a}' and '{role_b}'")]
    PinDuplicate {
        direction: IoDirection,
        pin: u16,
        role_a: IoRole,
        role_b: IoRole,
    },
    /// A role is bound more than once.
    #[error("duplicate role '{role}'")]
    RoleDuplicate { role: IoRole },
    /// Role bound to the wrong direction.
    #[error("role '{role}' expects {expected} but assigned to {actual}")]
    RoleDirectionMismatch {
        role: IoRole,
        expected: IoDirection,
        actual: IoDirection,
    },
    /// Pin number outside the addressable bank.
    #[error("role '{role}' uses pin {pin}, valid pins are 0..{max}", max = MAX_PINS)]
    PinOutOfRange { role: IoRole, pin: u16 },
    /// A required role has no binding.
    #[error("missing required role '{role}'")]
    RoleMissing { role: IoRole },
}

// ─── IoBinding ──────────────────────────────────────────────────────

/// Runtime binding of a role to its physical pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoBinding {
    /// Functional role.
    pub role: IoRole,
    /// Physical pin number.
    pub pin: u16,
    /// Electrical polarity (per-direction default already applied).
    pub logic: PinLogic,
    /// Optional label from config.
    pub name: Option<String>,
}

// ─── IoRegistry ─────────────────────────────────────────────────────

/// Validated role → pin map for all six sensors and eight outputs.
#[derive(Debug, Clone)]
pub struct IoRegistry {
    sensors: [IoBinding; SENSOR_COUNT],
    outputs: [IoBinding; OUTPUT_COUNT],
}

impl IoRegistry {
    /// Build the registry from an `IoConfig`, running all validation rules.
    ///
    /// Returns the first validation error encountered.
    pub fn from_config(config: &IoConfig) -> Result<Self, IoConfigError> {
        let mut seen: Vec<IoBinding> = Vec::with_capacity(SENSOR_COUNT + OUTPUT_COUNT);
        let mut seen_dirs: Vec<IoDirection> = Vec::with_capacity(SENSOR_COUNT + OUTPUT_COUNT);

        for (direction, point) in config.all_points() {
            if point.pin >= MAX_PINS {
                return Err(IoConfigError::PinOutOfRange {
                    role: point.role,
                    pin: point.pin,
                });
            }

            let expected = point.role.direction();
            if expected != direction {
                return Err(IoConfigError::RoleDirectionMismatch {
                    role: point.role,
                    expected,
                    actual: direction,
                });
            }

            if seen.iter().any(|b| b.role == point.role) {
                return Err(IoConfigError::RoleDuplicate { role: point.role });
            }

            if let Some(prev) = seen
                .iter()
                .zip(&seen_dirs)
                .find(|(b, d)| **d == direction && b.pin == point.pin)
                .map(|(b, _)| b)
            {
                return Err(IoConfigError::PinDuplicate {
                    direction,
                    pin: point.pin,
                    role_a: prev.role,
                    role_b: point.role,
                });
            }

            seen.push(IoBinding {
                role: point.role,
                pin: point.pin,
                logic: point.logic_for(direction),
                name: point.name.clone(),
            });
            seen_dirs.push(direction);
        }

        let take = |role: IoRole| -> Result<IoBinding, IoConfigError> {
            seen.iter()
                .find(|b| b.role == role)
                .cloned()
                .ok_or(IoConfigError::RoleMissing { role })
        };

        Ok(Self {
            sensors: [
                take(IoRole::Speed)?,
                take(IoRole::Vibration)?,
                take(IoRole::Thermal)?,
                take(IoRole::Vacuum)?,
                take(IoRole::Strain)?,
                take(IoRole::Acoustic)?,
            ],
            outputs: [
                take(IoRole::Balance)?,
                take(IoRole::TorqueBrake)?,
                take(IoRole::Damper)?,
                take(IoRole::EmergencyBrake)?,
                take(IoRole::Cooling)?,
                take(IoRole::RegenBrake)?,
                take(IoRole::Siren)?,
                take(IoRole::WarningLight)?,
            ],
        })
    }

    /// Look up a binding by role.
    pub fn get(&self, role: IoRole) -> Option<&IoBinding> {
        self.sensors
            .iter()
            .chain(self.outputs.iter())
            .find(|b| b.role == role)
    }

    // ─── Runtime I/O Access ─────────────────────────────────────────

    /// Decode electrical input levels into hazard bits, applying polarity.
    pub fn read_sensors(&self, inputs: PinBank) -> SensorReading {
        let mut reading = SensorReading::empty();
        for binding in &self.sensors {
            if binding.logic.decode(inputs.level(binding.pin)) {
                if let Some(flag) = binding.role.sensor_flag() {
                    reading |= flag;
                }
            }
        }
        reading
    }

    /// Electrical input levels that [`read_sensors`](Self::read_sensors)
    /// decodes back to `reading`. Used by simulated drivers.
    pub fn encode_sensors(&self, reading: SensorReading) -> PinBank {
        let mut bank = PinBank::ALL_LOW;
        for binding in &self.sensors {
            let active = binding
                .role
                .sensor_flag()
                .is_some_and(|flag| reading.contains(flag));
            bank.set_level(binding.pin, binding.logic.encode(active));
        }
        bank
    }

    /// Electrical output levels for a command, applying polarity.
    pub fn encode_outputs(&self, command: &ActuatorCommand) -> PinBank {
        let mut bank = PinBank::ALL_LOW;
        for binding in &self.outputs {
            let active = command.level(binding.role).unwrap_or(false);
            bank.set_level(binding.pin, binding.logic.encode(active));
        }
        bank
    }

    /// Logical command observed on the output pins.
    pub fn decode_outputs(&self, outputs: PinBank) -> ActuatorCommand {
        let mut command = ActuatorCommand::ALL_OFF;
        for binding in &self.outputs {
            command.set_level(binding.role, binding.logic.decode(outputs.level(binding.pin)));
        }
        command
    }
}

impl Default for IoRegistry {
    fn default() -> Self {
        match Self::from_config(&IoConfig::default_pin_map()) {
            Ok(registry) => registry,
            Err(e) => unreachable!("default pin map is valid: {e}"),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::IoPoint;

    fn point(role: IoRole, pin: u16) -> IoPoint {
        IoPoint {
            role,
            pin,
            logic: None,
            name: None,
        }
    }

    #[test]
    fn registry_construction() {
        let reg = IoRegistry::default();
        assert_eq!(reg.get(IoRole::Speed).map(|b| b.pin), Some(2));
        assert_eq!(reg.get(IoRole::WarningLight).map(|b| b.pin), Some(15));
        assert_eq!(
            reg.get(IoRole::Acoustic).map(|b| b.logic),
            Some(PinLogic::ActiveLow)
        );
        assert_eq!(
            reg.get(IoRole::Siren).map(|b| b.logic),
            Some(PinLogic::ActiveHigh)
        );
    }

    #[test]
    fn idle_pulled_high_inputs_read_safe() {
        let reg = IoRegistry::default();
        assert!(reg.read_sensors(PinBank(u64::MAX)).is_empty());
        assert_eq!(reg.read_sensors(PinBank::ALL_LOW), SensorReading::all());
    }

    #[test]
    fn low_pin_reads_as_hazard() {
        let reg = IoRegistry::default();
        let inputs = PinBank(u64::MAX).with_level(4, false);
        assert_eq!(reg.read_sensors(inputs), SensorReading::THERMAL);
    }

    #[test]
    fn sensor_encoding_inverts_read() {
        let reg = IoRegistry::default();
        for bits in 0u8..64 {
            let reading = SensorReading::from_bits_truncate(bits);
            assert_eq!(reg.read_sensors(reg.encode_sensors(reading)), reading);
        }
    }

    #[test]
    fn outputs_encode_on_configured_pins() {
        let reg = IoRegistry::default();
        let cmd = ActuatorCommand {
            cooling: true,
            warning_light: true,
            ..ActuatorCommand::ALL_OFF
        };
        let bank = reg.encode_outputs(&cmd);
        assert_eq!(bank, PinBank::ALL_LOW.with_level(12, true).with_level(15, true));
        assert_eq!(reg.decode_outputs(bank), cmd);
        assert_eq!(reg.encode_outputs(&ActuatorCommand::ALL_OFF), PinBank::ALL_LOW);
    }

    #[test]
    fn active_low_output_idles_high() {
        let mut config = IoConfig::default_pin_map();
        config.outputs[6].logic = Some(PinLogic::ActiveLow);
        let reg = IoRegistry::from_config(&config).unwrap();
        let bank = reg.encode_outputs(&ActuatorCommand::ALL_OFF);
        assert_eq!(bank, PinBank::ALL_LOW.with_level(14, true));
    }

    #[test]
    fn duplicate_pin_rejected() {
        let mut config = IoConfig::default_pin_map();
        config.di[1].pin = 2;
        assert_eq!(
            IoRegistry::from_config(&config).unwrap_err(),
            IoConfigError::PinDuplicate {
                direction: IoDirection::Di,
                pin: 2,
                role_a: IoRole::Speed,
                role_b: IoRole::Vibration,
            }
        );
    }

    #[test]
    fn same_pin_different_direction_ok() {
        let mut config = IoConfig::default_pin_map();
        config.outputs[0].pin = 2;
        assert!(IoRegistry::from_config(&config).is_ok());
    }

    #[test]
    fn duplicate_role_rejected() {
        let mut config = IoConfig::default_pin_map();
        config.di.push(point(IoRole::Thermal, 30));
        assert_eq!(
            IoRegistry::from_config(&config).unwrap_err(),
            IoConfigError::RoleDuplicate {
                role: IoRole::Thermal
            }
        );
    }

    #[test]
    fn sensor_role_on_output_rejected() {
        let mut config = IoConfig::default_pin_map();
        config.outputs.push(point(IoRole::Strain, 40));
        config.di.retain(|p| p.role != IoRole::Strain);
        assert!(matches!(
            IoRegistry::from_config(&config),
            Err(IoConfigError::RoleDirectionMismatch {
                role: IoRole::Strain,
                ..
            })
        ));
    }

    #[test]
    fn missing_role_rejected() {
        let mut config = IoConfig::default_pin_map();
        config.outputs.retain(|p| p.role != IoRole::Siren);
        assert_eq!(
            IoRegistry::from_config(&config).unwrap_err(),
            IoConfigError::RoleMissing { role: IoRole::Siren }
        );
    }

    #[test]
    fn pin_out_of_range_rejected() {
        let mut config = IoConfig::default_pin_map();
        config.di[0].pin = 64;
        assert!(matches!(
            IoRegistry::from_config(&config),
            Err(IoConfigError::PinOutOfRange { pin: 64, .. })
        ));
    }
}
