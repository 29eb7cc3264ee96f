//! I/O configuration, roles and the runtime role registry.
//!
//! - [`role`] - `IoRole`, `IoDirection`, `PinLogic`
//! - [`config`] - `IoConfig` / `IoPoint` deserialized from TOML
//! - [`registry`] - `IoRegistry` built and validated from `IoConfig`

pub mod config;
pub mod registry;
pub mod role;
