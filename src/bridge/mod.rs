//! Host-side serial bridge.
//!
//! Connects a queue of feed requests to the feeder's serial link: each
//! pending command becomes one command byte on the wire, and each
//! `Feed Complete` status line coming back marks the oldest in-flight
//! command executed.
//!
//! ```text
//!  CommandQueue ──pending──▶ FeedBridge ──'F'──▶ Transport ──▶ feeder
//!       ▲                        │
//!       └──mark_executed─────────┘◀── "Feed Complete." ◀──────┘
//! ```
//!
//! The feeder handles bytes strictly in order and one cycle at a time,
//! so completions arrive in the order commands were sent.

pub mod line;
pub mod queue;
#[cfg(feature = "bridge")]
pub mod serial_port;
pub mod transport;

use heapless::Deque;
use log::{debug, info, warn};

use crate::config::BridgeConfig;
use line::LineDecoder;
use queue::{CommandQueue, CommandStatus, FeedCommand};
use transport::Transport;

/// Commands sent and not yet confirmed.
pub const MAX_IN_FLIGHT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// The transport refused the command byte.
    TransportWrite,
    /// The transport failed while reading status output.
    TransportRead,
    /// Too many commands awaiting confirmation.
    Backlog,
    /// The queue has no command with this id.
    UnknownCommand(u64),
}

impl core::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TransportWrite => write!(f, "transport write failed"),
            Self::TransportRead => write!(f, "transport read failed"),
            Self::Backlog => write!(f, "{} commands already in flight", MAX_IN_FLIGHT),
            Self::UnknownCommand(id) => write!(f, "no command with id {}", id),
        }
    }
}

impl core::error::Error for BridgeError {}

pub struct FeedBridge<T, Q> {
    transport: T,
    queue: Q,
    config: BridgeConfig,
    decoder: LineDecoder,
    in_flight: Deque<u64, MAX_IN_FLIGHT>,
}

impl<T: Transport, Q: CommandQueue> FeedBridge<T, Q> {
    pub fn new(transport: T, queue: Q, config: BridgeConfig) -> Self {
        info!("Bridge: feeder on {} at {} baud", config.port_path, config.baud_rate);
        Self {
            transport,
            queue,
            config,
            decoder: LineDecoder::new(),
            in_flight: Deque::new(),
        }
    }

    /// The change feed is live: pick up the oldest command left pending
    /// while the bridge was down.  Returns its id, if any.
    pub fn on_subscribed(&mut self) -> Result<Option<u64>, BridgeError> {
        let pending = self.queue.pending();
        let Some(first) = pending.first() else {
            info!("Bridge: no pending commands");
            return Ok(None);
        };
        info!(
            "Bridge: {} pending command(s), processing #{}",
            pending.len(),
            first.id
        );
        self.process(first)?;
        Ok(Some(first.id))
    }

    /// A new row appeared in the queue.  Only pending rows are acted on.
    pub fn on_command_inserted(&mut self, cmd: &FeedCommand) -> Result<(), BridgeError> {
        if cmd.status != CommandStatus::Pending {
            debug!("Bridge: ignoring #{} with status {:?}", cmd.id, cmd.status);
            return Ok(());
        }
        info!("Bridge: new command #{} ({})", cmd.id, cmd.command_type);
        self.process(cmd)
    }

    /// Send the command byte for `cmd` and wait for its confirmation.
    pub fn process(&mut self, cmd: &FeedCommand) -> Result<(), BridgeError> {
        if self.in_flight.is_full() {
            return Err(BridgeError::Backlog);
        }
        let byte = [self.config.command_byte];
        let sent = self.transport.write(&byte).map_err(|e| {
            warn!("Bridge: write failed: {:?}", e);
            BridgeError::TransportWrite
        })?;
        if sent != byte.len() {
            warn!("Bridge: command #{} not accepted by transport", cmd.id);
            return Err(BridgeError::TransportWrite);
        }
        self.transport.flush().map_err(|e| {
            warn!("Bridge: flush failed: {:?}", e);
            BridgeError::TransportWrite
        })?;
        // Capacity checked above.
        let _ = self.in_flight.push_back(cmd.id);
        info!("Bridge: sent command #{}, awaiting confirmation", cmd.id);
        Ok(())
    }

    /// Drain the transport, handle every complete status line, and return
    /// how many lines were seen.
    ///
    /// A completion the queue rejects still consumes its in-flight id, and
    /// the remaining output is processed before the first such error is
    /// returned.
    pub fn poll(&mut self, now_ms: u64) -> Result<usize, BridgeError> {
        let mut lines = 0;
        let mut first_err = None;
        let mut buf = [0u8; 64];
        while self.transport.available() {
            let n = self.transport.read(&mut buf).map_err(|e| {
                warn!("Bridge: read failed: {:?}", e);
                BridgeError::TransportRead
            })?;
            if n == 0 {
                break;
            }
            for &b in &buf[..n] {
                let Some(line) = self.decoder.push(b) else {
                    continue;
                };
                lines += 1;
                if let Err(e) = self.handle_line(&line, now_ms) {
                    warn!("Bridge: {}", e);
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(lines),
        }
    }

    /// Oldest command awaiting confirmation.
    pub fn current(&self) -> Option<u64> {
        self.in_flight.front().copied()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut Q {
        &mut self.queue
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn handle_line(&mut self, line: &str, now_ms: u64) -> Result<(), BridgeError> {
        info!("Feeder: {}", line);
        if !line.contains(self.config.complete_marker.as_str()) {
            return Ok(());
        }
        match self.in_flight.pop_front() {
            Some(id) => {
                self.queue.mark_executed(id, now_ms)?;
                info!("Bridge: command #{} executed", id);
            }
            None => debug!("Bridge: completion with nothing in flight"),
        }
        Ok(())
    }
}
