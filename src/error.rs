//! Unified error types for the PetFeeder firmware.
//!
//! `Error` is what board bring-up returns; driver-level enums convert
//! into it. All variants are `Copy`, so none of them allocate.
//!
//! None of these ever reach the serial line: the feeder reports nothing
//! beyond its three status texts. Drivers log failures and carry on.

use core::fmt;

// ── Top-level firmware error ────────────────────────────────

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The serial link failed.
    Comms(CommsError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ── Actuator errors ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// The servo was commanded before a PWM channel was attached.
    NotAttached,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::NotAttached => write!(f, "servo not attached"),
        }
    }
}

impl core::error::Error for ActuatorError {}

// ── Communications errors ───────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    /// UART driver could not be installed.
    UartInitFailed(i32),
    /// Bytes could not be written to the UART.
    UartWriteFailed,
    /// Bytes could not be read from the UART.
    UartReadFailed,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UartInitFailed(rc) => write!(f, "UART init failed (rc={rc})"),
            Self::UartWriteFailed => write!(f, "UART write failed"),
            Self::UartReadFailed => write!(f, "UART read failed"),
        }
    }
}

impl core::error::Error for CommsError {}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ── Convenience Result alias ────────────────────────────────

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
