//! Safety classifier: risk aggregation, severity selection, actuator gating.
//!
//! Pure combinational logic, re-evaluated from scratch every cycle. The
//! previous state is read only to report whether a transition happened.
//!
//! ## Severity (first match wins)
//! 1. All six hazards → `Crisis`
//! 2. Any hazard → `Warning`
//! 3. Otherwise → `Normal`
//!
//! ## Actuator requests
//! | Actuator        | Request                              |
//! |-----------------|--------------------------------------|
//! | Balance         | S2 ∨ S5 ∨ S6                         |
//! | TorqueBrake     | S2 ∨ S3 ∨ S4 ∨ S5 ∨ S6 (mitigation)  |
//! | Damper          | S2 ∨ S5 ∨ S6                         |
//! | EmergencyBrake  | S4 ∨ (S1 ∧ (S2 ∨ S3 ∨ S5 ∨ S6))      |
//! | Cooling         | S3                                   |
//! | RegenBrake      | same as EmergencyBrake               |
//!
//! Every request is gated by `state ≠ Normal`. Siren = `Crisis`,
//! warning light = `state ≠ Normal`.

use fess_common::safety::{ActuatorCommand, SensorReading, SystemState};

/// Aggregate risk predicates over the six sensor bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAggregate {
    /// At least one hazard.
    pub any_risk: bool,
    /// At least one hazard other than overspeed.
    pub mitigation: bool,
    /// All six hazards at once.
    pub crisis_total: bool,
}

impl RiskAggregate {
    /// Compute the aggregate predicates.
    #[inline]
    pub const fn from_reading(s: SensorReading) -> Self {
        let without_speed = s.difference(SensorReading::SPEED);
        Self {
            any_risk: !s.is_empty(),
            mitigation: !without_speed.is_empty(),
            crisis_total: s.is_all(),
        }
    }

    /// Severity by fixed priority.
    #[inline]
    pub const fn severity(&self) -> SystemState {
        if self.crisis_total {
            SystemState::Crisis
        } else if self.any_risk {
            SystemState::Warning
        } else {
            SystemState::Normal
        }
    }
}

/// Ungated actuator requests, computed from raw sensor bits only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorRequests {
    pub balance: bool,
    pub torque_brake: bool,
    pub damper: bool,
    pub emergency_brake: bool,
    pub cooling: bool,
    pub regen_brake: bool,
}

impl ActuatorRequests {
    /// Compute each request from the sensor bits.
    #[inline]
    pub const fn from_reading(s: SensorReading) -> Self {
        let [s1, s2, s3, s4, s5, s6] = s.to_bools();
        let structural = s2 || s5 || s6;
        let brake = s4 || (s1 && (s2 || s3 || s5 || s6));
        Self {
            balance: structural,
            torque_brake: s2 || s3 || s4 || s5 || s6,
            damper: structural,
            emergency_brake: brake,
            cooling: s3,
            regen_brake: brake,
        }
    }

    /// Apply the gate. Nothing engages while the system is `Normal`.
    #[inline]
    pub const fn gate(&self, state: SystemState) -> ActuatorCommand {
        let act = state.is_safe_to_act();
        ActuatorCommand {
            balance: act && self.balance,
            torque_brake: act && self.torque_brake,
            damper: act && self.damper,
            emergency_brake: act && self.emergency_brake,
            cooling: act && self.cooling,
            regen_brake: act && self.regen_brake,
            siren: matches!(state, SystemState::Crisis),
            warning_light: act,
        }
    }
}

/// Result of one classifier evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// State for this cycle; becomes the next cycle's previous state.
    pub state: SystemState,
    /// Gated output levels.
    pub commands: ActuatorCommand,
    /// Whether `state` differs from the previous state.
    pub transitioned: bool,
}

/// Evaluate one cycle.
///
/// `previous` never affects the computed state or commands; it is
/// overwritten by the returned `state`.
#[inline]
pub const fn evaluate_cycle(sensors: SensorReading, previous: SystemState) -> CycleOutcome {
    let state = RiskAggregate::from_reading(sensors).severity();
    let commands = ActuatorRequests::from_reading(sensors).gate(state);
    CycleOutcome {
        state,
        commands,
        transitioned: state as u8 != previous as u8,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const S1: SensorReading = SensorReading::SPEED;
    const S3: SensorReading = SensorReading::THERMAL;
    const S4: SensorReading = SensorReading::VACUUM;

    #[test]
    fn aggregate_empty() {
        let agg = RiskAggregate::from_reading(SensorReading::empty());
        assert!(!agg.any_risk);
        assert!(!agg.mitigation);
        assert!(!agg.crisis_total);
        assert_eq!(agg.severity(), SystemState::Normal);
    }

    #[test]
    fn overspeed_alone_is_not_mitigation() {
        let agg = RiskAggregate::from_reading(S1);
        assert!(agg.any_risk);
        assert!(!agg.mitigation);
        assert_eq!(agg.severity(), SystemState::Warning);
    }

    #[test]
    fn five_of_six_is_only_warning() {
        for flag in SensorReading::ORDERED {
            let reading = SensorReading::all().difference(flag);
            assert_eq!(
                RiskAggregate::from_reading(reading).severity(),
                SystemState::Warning,
                "missing {:?}",
                flag
            );
        }
    }

    #[test]
    fn all_six_is_crisis() {
        let agg = RiskAggregate::from_reading(SensorReading::all());
        assert!(agg.crisis_total);
        assert_eq!(agg.severity(), SystemState::Crisis);
    }

    #[test]
    fn balance_and_damper_share_trigger() {
        for bits in 0u8..64 {
            let req = ActuatorRequests::from_reading(SensorReading::from_bits_truncate(bits));
            assert_eq!(req.balance, req.damper);
            assert_eq!(req.emergency_brake, req.regen_brake);
        }
    }

    #[test]
    fn overspeed_alone_requests_no_brake() {
        let req = ActuatorRequests::from_reading(S1);
        assert!(!req.emergency_brake);
        assert!(!req.torque_brake);
    }

    #[test]
    fn gate_blocks_everything_in_normal() {
        let req = ActuatorRequests::from_reading(SensorReading::all());
        assert_eq!(req.gate(SystemState::Normal), ActuatorCommand::ALL_OFF);
    }

    #[test]
    fn only_thermal() {
        let out = evaluate_cycle(S3, SystemState::Normal);
        assert_eq!(out.state, SystemState::Warning);
        assert!(out.transitioned);
        assert_eq!(
            out.commands,
            ActuatorCommand {
                torque_brake: true,
                cooling: true,
                warning_light: true,
                ..ActuatorCommand::ALL_OFF
            }
        );
    }

    #[test]
    fn speed_and_thermal_brake() {
        let out = evaluate_cycle(S1 | S3, SystemState::Warning);
        assert_eq!(out.state, SystemState::Warning);
        assert!(!out.transitioned);
        assert!(out.commands.emergency_brake);
        assert!(out.commands.regen_brake);
        assert!(out.commands.cooling);
        assert!(out.commands.torque_brake);
        assert!(!out.commands.balance);
        assert!(!out.commands.damper);
        assert!(!out.commands.siren);
    }

    #[test]
    fn vacuum_alone_brakes() {
        let out = evaluate_cycle(S4, SystemState::Normal);
        assert_eq!(out.state, SystemState::Warning);
        assert!(out.commands.emergency_brake);
        assert!(out.commands.regen_brake);
        assert!(!out.commands.siren);
    }

    #[test]
    fn crisis_back_to_normal_clears_all() {
        let out = evaluate_cycle(SensorReading::empty(), SystemState::Crisis);
        assert_eq!(out.state, SystemState::Normal);
        assert!(out.transitioned);
        assert_eq!(out.commands, ActuatorCommand::ALL_OFF);
    }
}
