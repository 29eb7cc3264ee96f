//! # FESS HAL Library
//!
//! Pluggable pin drivers for the flywheel safety monitor.
//! Drivers implement the `IoDriver` trait defined in `fess_common::hal::driver`.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐     ┌────────────────┐     ┌──────────────────┐
//! │  Control Unit     │────►│ DriverRegistry │────►│ IoDriver (trait) │
//! │  (cycle loop)     │     │  name→factory  │     │  simulation, ... │
//! └───────────────────┘     └────────────────┘     └──────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::builtin_registry;
