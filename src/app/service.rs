//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM and its context.  All I/O flows through
//! port traits injected at call sites, making the service testable with
//! mock adapters.
//!
//! ```text
//!  CommandPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │      AppService         │
//! ActuatorPort ◀── │   FSM (Closed/Open)     │ ◀── DelayNs
//!                  └────────────────────────┘
//! ```
//!
//! Both waits (startup settle, hold-open) block the caller.  Nothing is
//! read from the serial port while a dispense cycle runs.

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::config::FeederConfig;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::commands::AppCommand;
use super::events::{AppEvent, StatusLine};
use super::ports::{ActuatorPort, CommandPort, EventSink};

/// Pause between empty polls in [`AppService::run`].  At 9600 baud about
/// ten bytes arrive in this window, well inside the UART receive buffer.
pub const IDLE_YIELD_MS: u32 = 10;

/// What a single [`AppService::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No byte was waiting.
    Idle,
    /// One byte was consumed and it was not a command.
    Ignored(u8),
    /// The feed byte was consumed and a full cycle ran.
    Dispensed,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    cycles: u64,
    started: bool,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: FeederConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Closed);
        Self {
            fsm,
            ctx,
            cycles: 0,
            started: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce readiness, move the servo to closed, then wait `settle_ms`.
    pub fn start(
        &mut self,
        serial: &mut impl CommandPort,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        serial.write_line(StatusLine::Ready.as_str());

        self.fsm.start(&mut self.ctx);
        self.apply_actuators(hw);
        sink.emit(&AppEvent::Started {
            state: self.fsm.current_state(),
            angle_deg: self.ctx.config.closed_angle_deg,
        });

        delay.delay_ms(self.ctx.config.settle_ms);
        self.started = true;
        info!(
            "AppService started in {:?}, settled for {}ms",
            self.fsm.current_state(),
            self.ctx.config.settle_ms
        );
    }

    /// Run one loop iteration: consume at most one byte and act on it.
    pub fn poll(
        &mut self,
        serial: &mut impl CommandPort,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        let Some(byte) = serial.read_byte() else {
            return PollOutcome::Idle;
        };

        match AppCommand::from_byte(byte, &self.ctx.config) {
            Some(AppCommand::Feed) => {
                self.dispense(serial, hw, delay, sink);
                PollOutcome::Dispensed
            }
            None => {
                debug!("ignoring byte 0x{:02X}", byte);
                sink.emit(&AppEvent::ByteIgnored(byte));
                PollOutcome::Ignored(byte)
            }
        }
    }

    /// `start` followed by `poll` forever.
    pub fn run(
        &mut self,
        serial: &mut impl CommandPort,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        self.start(serial, hw, delay, sink);
        loop {
            if self.poll(serial, hw, delay, sink) == PollOutcome::Idle {
                delay.delay_ms(IDLE_YIELD_MS);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Dispense cycles completed since startup.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn config(&self) -> &FeederConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Open, hold, close.  Runs to completion once begun.
    fn dispense(
        &mut self,
        serial: &mut impl CommandPort,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        serial.write_line(StatusLine::Dispensing.as_str());

        self.ctx.pending = Some(AppCommand::Feed);
        self.step(hw, sink);

        let hold = self.ctx.config.hold_open_ms;
        delay.delay_ms(hold);
        self.ctx.open_elapsed_ms = self.ctx.open_elapsed_ms.saturating_add(hold);
        self.step(hw, sink);

        self.cycles += 1;
        serial.write_line(StatusLine::FeedComplete.as_str());
        sink.emit(&AppEvent::CycleCompleted {
            cycles: self.cycles,
        });
    }

    /// Tick the FSM once; on a transition, drive the servo and report it.
    fn step(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let prev = self.fsm.current_state();
        if let Some(next) = self.fsm.tick(&mut self.ctx) {
            self.apply_actuators(hw);
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: next,
            });
        }
    }

    /// Translate FSM actuator commands into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        if let Some(angle) = self.ctx.commands.servo_angle_deg {
            hw.set_servo_angle(angle);
        }
    }
}
