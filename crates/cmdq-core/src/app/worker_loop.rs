//! WorkerLoop - コマンド実行ループ
//!
//! # フロー
//! 1. CommandQueue::dequeue() で次の command を取得（None なら終了）
//! 2. ロックの外で execute() を同期実行
//! 3. CommandQueue::mark_execution_done()
//! 4. 1 に戻る
//!
//! command の panic は FailurePolicy に従って扱う。

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span};

use crate::config::FailurePolicy;
use crate::error::CmdqError;
use crate::observability::WorkerReport;
use crate::queue::CommandQueue;

/// Worker state machine: `Running -> Stopped` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    Running,
    Stopped,
}

/// The single consumer of a `CommandQueue`.
///
/// There is exactly one WorkerLoop per queue; commands never run
/// concurrently with each other.
pub struct WorkerLoop {
    queue: Arc<CommandQueue>,
    failure_policy: FailurePolicy,
}

impl WorkerLoop {
    pub fn new(queue: Arc<CommandQueue>, failure_policy: FailurePolicy) -> Self {
        Self {
            queue,
            failure_policy,
        }
    }

    /// Run until the queue signals exit. Blocks the calling thread.
    ///
    /// Returns `Err(CmdqError::CommandPanicked)` only under
    /// `FailurePolicy::Abort`.
    pub fn run(self) -> Result<WorkerReport, CmdqError> {
        let _span = info_span!("worker", policy = ?self.failure_policy).entered();
        let started_at = Utc::now();
        let mut executed = 0;
        let mut failed = 0;
        let mut state = WorkerState::Running;
        info!("worker started");

        while state == WorkerState::Running {
            let Some(mut command) = self.queue.dequeue() else {
                state = WorkerState::Stopped;
                continue;
            };

            let id = command.id();
            let result = panic::catch_unwind(AssertUnwindSafe(|| command.execute()));
            self.queue.mark_execution_done();

            match result {
                Ok(()) => executed += 1,
                Err(payload) => {
                    failed += 1;
                    let message = panic_message(&*payload);
                    error!(command_id = %id, name = command.name(), %message, "command panicked");

                    if self.failure_policy == FailurePolicy::Abort {
                        // consumer がいなくなるので、以降の dequeue も None にしておく
                        self.queue.hard_stop();
                        info!(executed, failed, "worker aborted");
                        return Err(CmdqError::CommandPanicked { id, message });
                    }
                }
            }
        }

        info!(executed, failed, "worker stopped");
        Ok(WorkerReport {
            executed,
            failed,
            started_at,
            stopped_at: Utc::now(),
        })
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
