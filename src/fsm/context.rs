//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the decoded command for this tick, how long the feeder has
//! been held open, the servo command output, and configuration.

use crate::app::commands::AppCommand;
use crate::config::FeederConfig;

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Commands that state handlers write to request actuator actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Desired servo angle in degrees.  `None` until the first state entry.
    pub servo_angle_deg: Option<u8>,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Input --
    /// Command decoded from the serial byte consumed this iteration.
    pub pending: Option<AppCommand>,
    /// Milliseconds the feeder has been held in the open position.
    pub open_elapsed_ms: u32,

    // -- Actuator outputs --
    /// Commands to be applied to the servo after the FSM runs.
    pub commands: ActuatorCommands,

    // -- Configuration --
    pub config: FeederConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: FeederConfig) -> Self {
        Self {
            pending: None,
            open_elapsed_ms: 0,
            commands: ActuatorCommands::default(),
            config,
        }
    }

    /// True once the open position has been held for the configured time.
    pub fn hold_elapsed(&self) -> bool {
        self.open_elapsed_ms >= self.config.hold_open_ms
    }
}
