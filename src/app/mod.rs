//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the feeder's behaviour: decode one serial byte,
//! run a dispense cycle on the feed command, ignore everything else.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
