//! Fixed-rate safety cycle: read → classify → write → report → sleep.
//!
//! ## Startup
//! 1. `IoDriver::init()` with the validated pin map.
//! 2. Every output driven to its inactive level.
//! 3. Startup banner written once to the status channel.
//!
//! ## Cycle Body
//! Read input pins → decode hazards (polarity applied) → `evaluate_cycle()`
//! → write output pins → status line. The body performs no heap
//! allocation; the status line is formatted into a `heapless::String`.
//!
//! ## Pacing
//! A fixed delay of [`CYCLE_PERIOD`] follows every cycle. A body that
//! takes longer than the period is counted as an overrun and never aborts
//! the loop.

use std::io;
use std::time::{Duration, Instant};

use fess_common::config::FessConfig;
use fess_common::consts::CYCLE_PERIOD;
use fess_common::hal::driver::IoDriver;
use fess_common::io::registry::IoRegistry;
use fess_common::safety::{ActuatorCommand, SystemState};
use fess_hal::DriverRegistry;
use tracing::{debug, info, warn};

use crate::classifier::{CycleOutcome, evaluate_cycle};
use crate::error::CycleError;
use crate::status::StatusReporter;

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last cycle body duration [ns].
    pub last_cycle_ns: u64,
    /// Minimum cycle body duration [ns].
    pub min_cycle_ns: u64,
    /// Maximum cycle body duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u64,
    /// Cycle bodies that took longer than the period.
    pub overruns: u64,
    /// Status lines that could not be written.
    pub status_failures: u64,
    /// Severity changes.
    pub transitions: u64,
    /// Cycles spent in each state, indexed by `SystemState as usize`.
    pub state_cycles: [u64; 3],
}

impl CycleStats {
    /// Create a new zeroed stats instance.
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
            status_failures: 0,
            transitions: 0,
            state_cycles: [0; 3],
        }
    }

    /// Record one cycle. O(1), no allocation.
    #[inline]
    pub fn record(&mut self, duration_ns: u64, outcome: &CycleOutcome) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns = self.sum_cycle_ns.saturating_add(duration_ns);
        self.state_cycles[outcome.state as usize] += 1;
        if outcome.transitioned {
            self.transitions += 1;
        }
    }

    /// Average cycle body time [ns] (returns 0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            self.sum_cycle_ns / self.cycle_count
        }
    }

    /// Cycles spent in `state`.
    #[inline]
    pub fn cycles_in(&self, state: SystemState) -> u64 {
        self.state_cycles[state as usize]
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Owns the driver, pin map, status channel and the retained severity.
pub struct CycleRunner<W: io::Write> {
    driver: Box<dyn IoDriver>,
    registry: IoRegistry,
    reporter: StatusReporter<W>,
    state: SystemState,
    stats: CycleStats,
    period: Duration,
    started: bool,
}

impl<W: io::Write> CycleRunner<W> {
    /// Create a runner. Nothing touches the pins until [`startup`](Self::startup).
    pub fn new(driver: Box<dyn IoDriver>, registry: IoRegistry, sink: W) -> Self {
        Self {
            driver,
            registry,
            reporter: StatusReporter::new(sink),
            state: SystemState::default(),
            stats: CycleStats::new(),
            period: CYCLE_PERIOD,
            started: false,
        }
    }

    /// Build the pin map and driver named in `config`.
    pub fn from_config(
        config: &FessConfig,
        drivers: &DriverRegistry,
        sink: W,
    ) -> Result<Self, CycleError> {
        let registry = config.registry()?;
        let driver = drivers.create_driver(&config.driver)?;
        info!(
            "Driver '{}' v{} selected",
            driver.name(),
            driver.version()
        );
        Ok(Self::new(driver, registry, sink))
    }

    /// Replace the end-of-cycle delay. Used by tests and benches to run
    /// without sleeping; the production binary always keeps [`CYCLE_PERIOD`].
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Initialize the driver, force all outputs off and emit the banner.
    pub fn startup(&mut self) -> Result<(), CycleError> {
        self.driver.init(&self.registry)?;
        self.driver
            .write_outputs(self.registry.encode_outputs(&ActuatorCommand::ALL_OFF));
        self.reporter.banner()?;
        self.started = true;
        info!(
            "Safety loop ready (driver={}, period={}ms, state={})",
            self.driver.name(),
            self.period.as_millis(),
            self.state
        );
        Ok(())
    }

    /// Execute one cycle body (no delay).
    pub fn step(&mut self) -> Result<CycleOutcome, CycleError> {
        if !self.started {
            return Err(CycleError::NotStarted);
        }
        let cycle_start = Instant::now();

        // ═══ READ ═══
        let inputs = self.driver.read_inputs();
        let sensors = self.registry.read_sensors(inputs);

        // ═══ CLASSIFY ═══
        let outcome = evaluate_cycle(sensors, self.state);
        if outcome.transitioned {
            debug!(
                "Severity {} -> {} (sensors {})",
                self.state,
                outcome.state,
                sensors.bit_string()
            );
        }
        self.state = outcome.state;

        // ═══ WRITE ═══
        self.driver
            .write_outputs(self.registry.encode_outputs(&outcome.commands));

        // ═══ REPORT ═══
        if let Err(e) = self.reporter.report(outcome.state, sensors) {
            self.stats.status_failures += 1;
            if self.stats.status_failures == 1 {
                warn!("Status channel write failed: {e}. Continuing without status output.");
            } else {
                debug!("Status channel write failed: {e}");
            }
        }

        let duration_ns = u64::try_from(cycle_start.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self.stats.record(duration_ns, &outcome);
        if duration_ns > self.period.as_nanos() as u64 && !self.period.is_zero() {
            self.stats.overruns += 1;
            debug!(
                "Cycle overrun: {duration_ns}ns > {}ns period",
                self.period.as_nanos()
            );
        }

        Ok(outcome)
    }

    /// Run the loop. `None` runs forever; `Some(n)` stops after `n` cycles.
    pub fn run(&mut self, limit: Option<u64>) -> Result<(), CycleError> {
        let mut executed: u64 = 0;
        loop {
            self.step()?;
            executed += 1;
            if limit.is_some_and(|n| executed >= n) {
                break;
            }
            if !self.period.is_zero() {
                std::thread::sleep(self.period);
            }
        }
        info!(
            "Safety loop stopped after {} cycles (avg={}ns, max={}ns, overruns={}, transitions={})",
            self.stats.cycle_count,
            self.stats.avg_cycle_ns(),
            self.stats.max_cycle_ns,
            self.stats.overruns,
            self.stats.transitions
        );
        Ok(())
    }

    /// Startup, loop and shutdown in one call.
    ///
    /// The driver is shut down whenever `startup()` got past driver init,
    /// even if the banner write or the loop failed. The first error wins.
    pub fn execute(&mut self, limit: Option<u64>) -> Result<(), CycleError> {
        let result = self.startup().and_then(|()| self.run(limit));
        if matches!(result, Err(CycleError::Driver(_))) && !self.started {
            // Driver init itself failed; nothing to release.
            return result;
        }
        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    /// Shut the driver down. Output pins keep their last level.
    pub fn shutdown(&mut self) -> Result<(), CycleError> {
        if let Some(diag) = self.driver.diagnostics() {
            debug!("Driver diagnostics at shutdown: {:?}", diag);
        }
        self.driver.shutdown()?;
        self.started = false;
        Ok(())
    }

    /// Current (last evaluated) severity.
    pub fn state(&self) -> SystemState {
        self.state
    }

    /// Cycle statistics.
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// The driver.
    pub fn driver(&self) -> &dyn IoDriver {
        self.driver.as_ref()
    }

    /// The pin map.
    pub fn registry(&self) -> &IoRegistry {
        &self.registry
    }

    /// The status sink.
    pub fn sink(&self) -> &W {
        self.reporter.sink()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
