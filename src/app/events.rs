//! Outbound application events and serial status lines.
//!
//! [`StatusLine`] is the human-readable text the feeder writes back on the
//! serial link.  [`AppEvent`] is the structured form the service emits
//! through the [`EventSink`](super::ports::EventSink) port for logging.

use crate::fsm::StateId;

/// Text written to the serial channel.  No machine-readable framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    Ready,
    Dispensing,
    FeedComplete,
}

impl StatusLine {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "Feeder Ready. Sending test pulse...",
            Self::Dispensing => "Dispensing Food...",
            Self::FeedComplete => "Feed Complete.",
        }
    }
}

impl core::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state and servo angle).
    Started { state: StateId, angle_deg: u8 },

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A dispense cycle finished; carries the running total.
    CycleCompleted { cycles: u64 },

    /// A byte arrived that is not a command.
    ByteIgnored(u8),
}
