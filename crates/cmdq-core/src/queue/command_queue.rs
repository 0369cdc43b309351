//! CommandQueue - 単一 consumer 向けのスレッドセーフな FIFO
//!
//! # 学習ポイント
//! - Mutex + Condvar による blocking dequeue
//! - 複合条件の wait は必ずループで再判定する（spurious wakeup 対策）
//! - ユーザーコード（Command::execute）はロックの外で走らせる

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::QueueState;
use crate::domain::{Command, CommandId, QueuedCommand};
use crate::observability::QueueStatus;
use crate::ports::{Clock, IdGenerator, SystemClock, UlidGenerator};

/// Which of the two stop operations to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMode {
    /// Drain what is queued, then stop.
    Soft,
    /// Stop now; queued commands are discarded.
    Hard,
}

/// Thread-safe FIFO of pending commands with a two-tier shutdown.
///
/// - any number of producers call `enqueue`
/// - exactly one worker calls `dequeue` / `mark_execution_done`
/// - `soft_stop` lets the worker drain what is queued, `hard_stop` ends
///   consumption immediately
///
/// # 使用例
/// ```ignore
/// let queue = Arc::new(CommandQueue::new());
/// queue.enqueue(|| println!("Hello 1"));
/// queue.soft_stop();
///
/// while let Some(mut cmd) = queue.dequeue() {
///     cmd.execute();
///     queue.mark_execution_done();
/// }
/// ```
pub struct CommandQueue {
    state: Mutex<QueueState>,
    /// enqueue / hard_stop / soft_stop で通知
    condvar: Condvar,
    clock: Arc<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids = UlidGenerator::new(Arc::clone(&clock));
        Self::with_ports(clock, ids)
    }

    /// Build a queue with an injected clock and id generator.
    pub fn with_ports(clock: Arc<dyn Clock>, ids: impl IdGenerator + 'static) -> Self {
        Self {
            state: Mutex::new(QueueState::new()),
            condvar: Condvar::new(),
            clock,
            ids: Box::new(ids),
        }
    }

    // Command はロックの外で実行されるので、poison されても state は壊れていない
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a command to the tail and wake the worker.
    ///
    /// Always accepted, also after a stop was requested.
    pub fn enqueue(&self, command: impl Command) -> CommandId {
        self.enqueue_boxed(Box::new(command))
    }

    pub fn enqueue_boxed(&self, command: Box<dyn Command>) -> CommandId {
        let id = self.ids.generate_command_id();
        let queued = QueuedCommand::new(id, self.clock.now(), command);

        let pending = {
            let mut state = self.lock();
            state.pending.push_back(queued);
            self.condvar.notify_one();
            state.pending.len()
        };

        debug!(command_id = %id, pending, "command enqueued");
        id
    }

    /// Block until a command is available or the queue tells the worker to
    /// exit.
    ///
    /// Returns `None` once the queue is hard-stopped, or soft-stopped and
    /// empty. That is terminal for the worker.
    pub fn dequeue(&self) -> Option<QueuedCommand> {
        let mut state = self.lock();

        // wait は lock を手放して眠り、起きたら取り直す。条件は毎回見直す
        while state.must_wait() {
            state = self
                .condvar
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }

        let next = state.begin_next();
        let pending = state.pending.len();
        drop(state);

        match &next {
            Some(command) => {
                debug!(command_id = %command.id(), pending, "command dequeued")
            }
            None => debug!(pending, "dequeue returned exit signal"),
        }
        next
    }

    /// Stop consumption now. Queued commands are never dequeued afterwards.
    ///
    /// A command already handed to the worker still runs to completion.
    pub fn hard_stop(&self) {
        let first = {
            let mut state = self.lock();
            let first = !state.hard_stop_requested;
            state.hard_stop_requested = true;
            self.condvar.notify_all();
            first
        };

        if first {
            info!("hard stop requested");
        }
    }

    /// Let the worker drain the queue, then stop.
    pub fn soft_stop(&self) {
        let first = {
            let mut state = self.lock();
            let first = !state.soft_stop_requested;
            state.soft_stop_requested = true;
            self.condvar.notify_all();
            first
        };

        if first {
            info!("soft stop requested");
        }
    }

    pub fn stop(&self, mode: StopMode) {
        match mode {
            StopMode::Soft => self.soft_stop(),
            StopMode::Hard => self.hard_stop(),
        }
    }

    /// Called by the worker after `execute()` returned (or panicked).
    pub fn mark_execution_done(&self) {
        self.lock().executing = false;
    }

    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }

    pub fn is_hard_stopped(&self) -> bool {
        self.lock().hard_stop_requested
    }

    pub fn is_soft_stopped(&self) -> bool {
        self.lock().soft_stop_requested
    }

    /// Has either stop been requested?
    pub fn has_stop_signal(&self) -> bool {
        let state = self.lock();
        state.hard_stop_requested || state.soft_stop_requested
    }

    /// Snapshot of the queue for status output.
    pub fn status(&self) -> QueueStatus {
        let state = self.lock();
        QueueStatus {
            pending: state.pending.len(),
            executing: state.executing,
            hard_stop_requested: state.hard_stop_requested,
            soft_stop_requested: state.soft_stop_requested,
        }
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
