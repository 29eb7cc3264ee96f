//! # FESS Control Unit Library
//!
//! Safety monitor for a flywheel energy-storage system. Every cycle the
//! unit samples six binary hazard sensors, classifies the system into
//! NORMAL, WARNING or CRISIS, drives eight outputs and writes one status
//! line.
//!
//! ## Modules
//!
//! - [`classifier`] - Pure severity and actuator logic
//! - [`status`] - Status line formatting and the status channel
//! - [`cycle`] - Startup, the fixed-delay loop and cycle statistics
//! - [`error`] - Lifecycle errors
//!
//! ## Allocation-Free Cycle
//!
//! Pin banks are `u64` words and the status line is a `heapless::String`.
//! Nothing inside `CycleRunner::step()` touches the heap.

pub mod classifier;
pub mod cycle;
pub mod error;
pub mod status;
