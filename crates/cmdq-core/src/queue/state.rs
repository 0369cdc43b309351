//! Lock-protected queue state and the dequeue predicate.

use std::collections::VecDeque;

use crate::domain::QueuedCommand;

/// Everything the queue lock protects.
///
/// State transitions of the flags:
/// - hard_stop_requested: false -> true (terminal)
/// - soft_stop_requested: false -> true (terminal)
/// - executing: false -> true on dequeue, true -> false on mark_execution_done
#[derive(Debug, Default)]
pub(crate) struct QueueState {
    pub(crate) pending: VecDeque<QueuedCommand>,
    pub(crate) hard_stop_requested: bool,
    pub(crate) soft_stop_requested: bool,
    pub(crate) executing: bool,
}

impl QueueState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Should a dequeue keep blocking on the condvar?
    ///
    /// The `executing` term keeps a soft-stopped queue waiting while a command
    /// is still in flight. With a single consumer it is always false here,
    /// because the worker marks execution done before it dequeues again.
    pub(crate) fn must_wait(&self) -> bool {
        self.pending.is_empty()
            && !self.hard_stop_requested
            && !(self.soft_stop_requested && !self.executing)
    }

    /// Take the head for execution, or `None` when the consumer must exit.
    ///
    /// Call only after `must_wait()` returned false.
    pub(crate) fn begin_next(&mut self) -> Option<QueuedCommand> {
        if self.hard_stop_requested {
            return None;
        }
        let command = self.pending.pop_front()?;
        self.executing = true;
        Some(command)
    }
}
