//! Feed command queue — where the bridge finds work and reports results.
//!
//! The hosted deployment keeps this in a database table of rows with a
//! `PENDING` / `EXECUTED` status.  [`CommandQueue`] is the port; the
//! in-memory [`MemoryQueue`] is the implementation shipped here.

use serde::{Deserialize, Serialize};

use super::BridgeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandStatus {
    Pending,
    Executed,
}

/// One queued request to feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCommand {
    pub id: u64,
    /// Free-form label from the requester (e.g. "FEED_NOW", "SCHEDULED").
    pub command_type: String,
    pub status: CommandStatus,
    /// Bridge clock reading when the feeder reported completion.
    pub executed_at_ms: Option<u64>,
}

/// Persistent home of feed commands.
pub trait CommandQueue {
    /// Every command still waiting, oldest first.
    fn pending(&self) -> Vec<FeedCommand>;

    /// Record that the feeder finished `id`.
    fn mark_executed(&mut self, id: u64, at_ms: u64) -> Result<(), BridgeError>;
}

/// Volatile queue for tests and single-process use.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    commands: Vec<FeedCommand>,
    next_id: u64,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new pending command and return it.
    pub fn push_pending(&mut self, command_type: &str) -> FeedCommand {
        self.next_id += 1;
        let cmd = FeedCommand {
            id: self.next_id,
            command_type: command_type.to_owned(),
            status: CommandStatus::Pending,
            executed_at_ms: None,
        };
        self.commands.push(cmd.clone());
        cmd
    }

    pub fn get(&self, id: u64) -> Option<&FeedCommand> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandQueue for MemoryQueue {
    fn pending(&self) -> Vec<FeedCommand> {
        self.commands
            .iter()
            .filter(|c| c.status == CommandStatus::Pending)
            .cloned()
            .collect()
    }

    fn mark_executed(&mut self, id: u64, at_ms: u64) -> Result<(), BridgeError> {
        let cmd = self
            .commands
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(BridgeError::UnknownCommand(id))?;
        cmd.status = CommandStatus::Executed;
        cmd.executed_at_ms = Some(at_ms);
        Ok(())
    }
}
