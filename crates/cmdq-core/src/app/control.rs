//! Control commands - 停止要求そのものを Command としてキューに積む
//!
//! `SoftStopCommand` を積むと「ここまで（とその後に積まれた分）を流したら止まる」、
//! `HardStopCommand` を積むと「ここより前だけ流して止まる」になる。
//!
//! キューは自分の中に積まれた command を保持するので、
//! 強参照だと循環参照になる。Weak で持つ。

use std::sync::{Arc, Weak};

use crate::domain::Command;
use crate::queue::{CommandQueue, StopMode};

/// Requests a stop on its queue when the worker executes it.
pub struct StopCommand {
    queue: Weak<CommandQueue>,
    mode: StopMode,
}

impl StopCommand {
    pub fn new(queue: &Arc<CommandQueue>, mode: StopMode) -> Self {
        Self {
            queue: Arc::downgrade(queue),
            mode,
        }
    }

    pub fn soft(queue: &Arc<CommandQueue>) -> Self {
        Self::new(queue, StopMode::Soft)
    }

    pub fn hard(queue: &Arc<CommandQueue>) -> Self {
        Self::new(queue, StopMode::Hard)
    }

    pub fn mode(&self) -> StopMode {
        self.mode
    }
}

impl Command for StopCommand {
    fn execute(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.stop(self.mode);
        }
    }

    fn name(&self) -> &str {
        match self.mode {
            StopMode::Soft => "soft_stop",
            StopMode::Hard => "hard_stop",
        }
    }
}
