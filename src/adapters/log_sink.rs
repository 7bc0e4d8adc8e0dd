//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (the ESP-IDF console in production).  These never go out on
//! the command UART.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { state, angle_deg } => {
                info!("START | state={:?} servo={}°", state, angle_deg);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::CycleCompleted { cycles } => {
                info!("FEED  | cycle complete (total={})", cycles);
            }
            AppEvent::ByteIgnored(b) => {
                debug!("RX    | ignored 0x{:02X}", b);
            }
        }
    }
}
