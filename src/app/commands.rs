//! Inbound commands to the application service.
//!
//! The serial link carries exactly one command: a single byte asking for
//! food. Every other byte value decodes to nothing.

use crate::config::FeederConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Run one open/close dispense cycle.
    Feed,
}

impl AppCommand {
    /// Decode a received byte.  Only the configured feed byte is a command.
    pub fn from_byte(byte: u8, config: &FeederConfig) -> Option<Self> {
        (byte == config.feed_command).then_some(Self::Feed)
    }
}
