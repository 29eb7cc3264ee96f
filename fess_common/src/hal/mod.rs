//! Hardware boundary: pin banks and the driver trait.
//!
//! - [`types`] - `PinBank` electrical level bitmask
//! - [`driver`] - `IoDriver` trait, `DriverError`, `DriverSettings`

pub mod driver;
pub mod types;
