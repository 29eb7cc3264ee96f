//! # FESS Control Unit
//!
//! Fixed-delay safety loop for the flywheel energy-storage system.
//!
//! Loads `fess.toml` (or built-in defaults), creates the configured pin
//! driver, forces every output off, prints the startup banner and then
//! writes one status line per cycle to stdout. Logs go to stderr.

use clap::Parser;
use fess_common::config::{ConfigError, FessConfig, LogLevel};
use fess_common::safety::SystemState;
use fess_control_unit::cycle::CycleRunner;
use fess_hal::builtin_registry;
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// FESS Control Unit: flywheel safety monitor
#[derive(Parser, Debug)]
#[command(name = "fess_control_unit")]
#[command(version)]
#[command(about = "Flywheel energy-storage safety monitor")]
struct Args {
    /// Path to the monitor configuration (fess.toml). Built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the driver name from the config.
    #[arg(long, value_name = "NAME")]
    driver: Option<String>,

    /// Override the simulation scenario file.
    #[arg(long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Stop after N cycles (runs forever when omitted).
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let loaded = load_config(&args);

    let log_level = loaded
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("FESS Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("FESS Control Unit shutdown complete");
}

fn load_config(args: &Args) -> Result<FessConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => FessConfig::load_validated(path)?,
        None => FessConfig::default(),
    };
    if let Some(name) = &args.driver {
        config.driver.name = name.clone();
    }
    if let Some(scenario) = &args.scenario {
        config.driver.scenario = Some(scenario.clone());
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args, config: FessConfig) -> Result<(), Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => info!("Config OK: {} ({})", path.display(), config.shared.service_name),
        None => info!("No --config given, using built-in defaults"),
    }

    let drivers = builtin_registry();
    info!("Available drivers: {:?}", drivers.list_drivers());

    let stdout = std::io::stdout().lock();
    let mut runner = CycleRunner::from_config(&config, &drivers, stdout)?;
    runner.execute(args.cycles)?;

    let stats = runner.stats();
    info!(
        "Cycles: {} (normal={}, warning={}, crisis={}), status write failures: {}",
        stats.cycle_count,
        stats.cycles_in(SystemState::Normal),
        stats.cycles_in(SystemState::Warning),
        stats.cycles_in(SystemState::Crisis),
        stats.status_failures
    );
    Ok(())
}

/// Setup tracing subscriber on stderr; stdout carries the status lines.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::from(configured)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}
