//! FESS Common Library
//!
//! Shared types, constants and configuration loading for the flywheel
//! energy-storage safety monitor workspace.
//!
//! # Module Structure
//!
//! - [`safety`] - Sensor reading, severity state and actuator command types
//! - [`io`] - I/O roles, pin map configuration and the role registry
//! - [`hal`] - I/O driver trait, pin banks and driver errors
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Fixed system constants
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use fess_common::prelude::*;
//!
//! let reading = SensorReading::THERMAL;
//! assert_eq!(reading.bit_string().as_str(), "001000");
//! ```

pub mod config;
pub mod consts;
pub mod hal;
pub mod io;
pub mod prelude;
pub mod safety;
