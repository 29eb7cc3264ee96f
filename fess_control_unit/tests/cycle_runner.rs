//! Cycle runner integration tests: simulation driver → pin map →
//! classifier → output pins and status lines.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use fess_common::config::FessConfig;
use fess_common::hal::driver::{DriverDiagnostics, DriverError, IoDriver};
use fess_common::hal::types::PinBank;
use fess_common::io::registry::IoRegistry;
use fess_common::io::role::IoRole;
use fess_common::safety::{ActuatorCommand, SystemState};
use fess_control_unit::cycle::CycleRunner;
use fess_control_unit::error::CycleError;
use fess_hal::builtin_registry;
use fess_hal::drivers::simulation::{Scenario, SimulationDriver};

const ESCALATION: &str = r#"
name = "short"

[[step]]
cycles = 1
active = []

[[step]]
cycles = 1
active = ["Thermal"]

[[step]]
cycles = 1
active = ["Speed", "Vibration", "Thermal", "Vacuum", "Strain", "Acoustic"]

[[step]]
cycles = 1
active = []
"#;

fn runner(scenario: &str) -> CycleRunner<Vec<u8>> {
    let scenario = Scenario::from_toml(scenario).unwrap();
    let driver = SimulationDriver::with_scenario(&scenario);
    CycleRunner::new(Box::new(driver), IoRegistry::default(), Vec::new())
        .with_period(Duration::ZERO)
}

fn output_text(runner: &CycleRunner<Vec<u8>>) -> String {
    String::from_utf8(runner.sink().clone()).unwrap()
}

#[test]
fn startup_forces_outputs_off_and_prints_banner() {
    let mut runner = runner(ESCALATION);
    runner.startup().unwrap();

    assert_eq!(output_text(&runner), "FESS SAFETY MONITOR READY\n");
    let diag = runner.driver().diagnostics().unwrap();
    assert_eq!(diag.writes, 1);
    assert_eq!(
        runner.registry().decode_outputs(diag.last_outputs),
        ActuatorCommand::ALL_OFF
    );
    assert_eq!(runner.state(), SystemState::Normal);
}

#[test]
fn run_before_startup_fails() {
    let mut runner = runner(ESCALATION);
    assert!(matches!(runner.run(Some(1)), Err(CycleError::NotStarted)));
}

#[test]
fn escalation_scenario_lines_and_pins() {
    let mut runner = runner(ESCALATION);
    runner.startup().unwrap();

    let thermal = {
        runner.step().unwrap();
        runner.step().unwrap()
    };
    assert_eq!(thermal.state, SystemState::Warning);
    let pins = runner.driver().diagnostics().unwrap().last_outputs;
    let registry = runner.registry();
    let cooling_pin = registry.get(IoRole::Cooling).unwrap().pin;
    let siren_pin = registry.get(IoRole::Siren).unwrap().pin;
    assert!(pins.level(cooling_pin));
    assert!(!pins.level(siren_pin));

    let crisis = runner.step().unwrap();
    assert_eq!(crisis.state, SystemState::Crisis);
    let pins = runner.driver().diagnostics().unwrap().last_outputs;
    assert!(pins.level(siren_pin));

    let calm = runner.step().unwrap();
    assert_eq!(calm.state, SystemState::Normal);
    assert!(calm.transitioned);

    assert_eq!(
        output_text(&runner),
        "FESS SAFETY MONITOR READY\n\
         Status: NORMAL  | Sensor: 000000\n\
         Status: WARNING | Sensor: 001000\n\
         Status: CRISIS  | Sensor: 111111\n\
         Status: NORMAL  | Sensor: 000000\n"
    );

    let stats = runner.stats();
    assert_eq!(stats.cycle_count, 4);
    assert_eq!(stats.transitions, 3);
    assert_eq!(stats.cycles_in(SystemState::Normal), 2);
    assert_eq!(stats.cycles_in(SystemState::Warning), 1);
    assert_eq!(stats.cycles_in(SystemState::Crisis), 1);
    assert_eq!(stats.status_failures, 0);
}

#[test]
fn bounded_run_stops_after_limit() {
    let mut runner = runner(ESCALATION);
    runner.startup().unwrap();
    runner.run(Some(3)).unwrap();
    assert_eq!(runner.stats().cycle_count, 3);
    assert_eq!(runner.state(), SystemState::Crisis);
    runner.shutdown().unwrap();

    // Banner plus one line per cycle.
    assert_eq!(output_text(&runner).lines().count(), 4);
}

#[test]
fn from_default_config_uses_simulation() {
    let config = FessConfig::default();
    let mut runner =
        CycleRunner::from_config(&config, &builtin_registry(), Vec::new()).unwrap();
    assert_eq!(runner.driver().name(), "simulation");
    runner.startup().unwrap();
    let out = runner.step().unwrap();
    assert_eq!(out.state, SystemState::Normal);
}

#[test]
fn unknown_driver_is_rejected() {
    let mut config = FessConfig::default();
    config.driver.name = "gpiochip".to_string();
    let result = CycleRunner::from_config(&config, &builtin_registry(), Vec::new());
    assert!(matches!(result, Err(CycleError::Driver(_))));
}

#[test]
fn config_file_with_relative_scenario() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("overheat.toml"),
        "[[step]]\ncycles = 5\nactive = [\"Thermal\"]\n",
    )
    .unwrap();
    let config_path = tmp.path().join("fess.toml");
    std::fs::write(
        &config_path,
        "[driver]\nname = \"simulation\"\nscenario = \"overheat.toml\"\n",
    )
    .unwrap();

    let config = FessConfig::load_validated(&config_path).unwrap();
    let mut runner = CycleRunner::from_config(&config, &builtin_registry(), Vec::new())
        .unwrap()
        .with_period(Duration::ZERO);
    runner.startup().unwrap();
    runner.run(Some(2)).unwrap();

    assert_eq!(runner.state(), SystemState::Warning);
    assert!(output_text(&runner).ends_with("Status: WARNING | Sensor: 001000\n"));
}

/// Accepts writes until the first flush (the banner), then fails every write.
#[derive(Default)]
struct FailsAfterBanner {
    flushed: bool,
    written: Vec<u8>,
}

impl io::Write for FailsAfterBanner {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.flushed {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

/// Fails every write, including the banner.
struct ClosedSink;

impl io::Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Simulation driver that records whether `shutdown()` was called.
struct TrackedDriver {
    inner: SimulationDriver,
    shut_down: Arc<AtomicBool>,
}

impl IoDriver for TrackedDriver {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn version(&self) -> &'static str {
        self.inner.version()
    }

    fn init(&mut self, registry: &IoRegistry) -> Result<(), DriverError> {
        self.inner.init(registry)
    }

    fn read_inputs(&mut self) -> PinBank {
        self.inner.read_inputs()
    }

    fn write_outputs(&mut self, outputs: PinBank) {
        self.inner.write_outputs(outputs);
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        self.shut_down.store(true, Ordering::SeqCst);
        self.inner.shutdown()
    }

    fn diagnostics(&self) -> Option<DriverDiagnostics> {
        self.inner.diagnostics()
    }
}

const OVERHEAT: &str = "[[step]]\ncycles = 10\nactive = [\"Thermal\"]\n";

#[test]
fn status_write_failures_are_counted_and_loop_continues() {
    let scenario = Scenario::from_toml(OVERHEAT).unwrap();
    let driver = SimulationDriver::with_scenario(&scenario);
    let mut runner = CycleRunner::new(
        Box::new(driver),
        IoRegistry::default(),
        FailsAfterBanner::default(),
    )
    .with_period(Duration::ZERO);
    runner.startup().unwrap();

    runner.run(Some(3)).unwrap();

    let stats = runner.stats();
    assert_eq!(stats.cycle_count, 3);
    assert_eq!(stats.status_failures, 3);
    assert_eq!(runner.state(), SystemState::Warning);
    assert_eq!(runner.sink().written, b"FESS SAFETY MONITOR READY\n");

    // Startup write plus one write per cycle, last one with cooling engaged.
    let diag = runner.driver().diagnostics().unwrap();
    assert_eq!(diag.writes, 4);
    let outputs = runner.registry().decode_outputs(diag.last_outputs);
    assert!(outputs.cooling);
    assert!(outputs.torque_brake);
    assert!(outputs.warning_light);
}

#[test]
fn overruns_are_counted_and_loop_continues() {
    let mut runner = runner(ESCALATION).with_period(Duration::from_nanos(1));
    runner.startup().unwrap();

    runner.run(Some(3)).unwrap();

    let stats = runner.stats();
    assert_eq!(stats.cycle_count, 3);
    assert!(stats.overruns > 0);
    assert_eq!(runner.state(), SystemState::Crisis);
}

#[test]
fn execute_shuts_driver_down_after_bounded_run() {
    let shut_down = Arc::new(AtomicBool::new(false));
    let driver = TrackedDriver {
        inner: SimulationDriver::with_scenario(&Scenario::from_toml(OVERHEAT).unwrap()),
        shut_down: Arc::clone(&shut_down),
    };
    let mut runner = CycleRunner::new(Box::new(driver), IoRegistry::default(), Vec::new())
        .with_period(Duration::ZERO);

    runner.execute(Some(2)).unwrap();

    assert!(shut_down.load(Ordering::SeqCst));
    assert_eq!(runner.stats().cycle_count, 2);
    assert_eq!(output_text(&runner).lines().count(), 3);
}

#[test]
fn execute_shuts_driver_down_when_banner_fails() {
    let shut_down = Arc::new(AtomicBool::new(false));
    let driver = TrackedDriver {
        inner: SimulationDriver::new(),
        shut_down: Arc::clone(&shut_down),
    };
    let mut runner = CycleRunner::new(Box::new(driver), IoRegistry::default(), ClosedSink)
        .with_period(Duration::ZERO);

    let result = runner.execute(Some(2));

    assert!(matches!(result, Err(CycleError::Status(_))));
    assert!(shut_down.load(Ordering::SeqCst));
    assert_eq!(runner.stats().cycle_count, 0);
}
