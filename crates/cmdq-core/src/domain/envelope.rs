//! QueuedCommand - キューに積まれている間の Command の入れ物
//!
//! enqueue 時に ID と時刻を付与し、dequeue で所有権ごと worker に渡します。

use std::fmt;

use chrono::{DateTime, Utc};

use super::command::Command;
use super::ids::CommandId;

/// A command together with the metadata assigned when it was enqueued.
pub struct QueuedCommand {
    id: CommandId,
    enqueued_at: DateTime<Utc>,
    command: Box<dyn Command>,
}

impl QueuedCommand {
    pub fn new(id: CommandId, enqueued_at: DateTime<Utc>, command: Box<dyn Command>) -> Self {
        Self {
            id,
            enqueued_at,
            command,
        }
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn enqueued_at(&self) -> DateTime<Utc> {
        self.enqueued_at
    }

    pub fn name(&self) -> &str {
        self.command.name()
    }

    /// Execute the wrapped command.
    pub fn execute(&mut self) {
        self.command.execute();
    }

    pub fn into_command(self) -> Box<dyn Command> {
        self.command
    }
}

// Box<dyn Command> は Debug を要求しないので手書きする
impl fmt::Debug for QueuedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueuedCommand")
            .field("id", &self.id)
            .field("enqueued_at", &self.enqueued_at)
            .field("name", &self.name())
            .finish()
    }
}
