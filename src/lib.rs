//! PetFeeder firmware library.
//!
//! Exposes the control-loop core, drivers and adapters for integration
//! testing, plus the host-side serial bridge. All ESP-IDF-specific code
//! is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod board;
pub mod bridge;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
