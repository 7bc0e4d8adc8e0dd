//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (serial link, servo, event sink) implement these
//! traits.  The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Blocking waits use [`embedded_hal::delay::DelayNs`] directly rather than
//! a port of our own.

// ───────────────────────────────────────────────────────────────
// Command port (driven adapter: serial link ↔ domain)
// ───────────────────────────────────────────────────────────────

/// The serial channel: single command bytes in, status lines out.
pub trait CommandPort {
    /// Take one byte from the receive buffer, if any.  Never blocks.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write one line of text followed by the line terminator.
    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to position the servo.
pub trait ActuatorPort {
    /// Command the servo to an absolute angle (0–180 degrees).
    fn set_servo_angle(&mut self, degrees: u8);

    /// Last angle commanded, `None` before the first command.
    /// The servo has no feedback line, so this is never a measured value.
    fn servo_angle(&self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
