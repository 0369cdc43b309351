//! WorkerHandle - 専用スレッド上の WorkerLoop
//!
//! # 学習ポイント
//! - consumer は tokio のタスクではなく専用の OS スレッド（dequeue はスレッドをブロックする）
//! - async 側からの join は spawn_blocking で橋渡しする

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::debug;

use super::worker_loop::{WorkerLoop, WorkerState, panic_message};
use crate::config::WorkerConfig;
use crate::error::CmdqError;
use crate::observability::WorkerReport;
use crate::queue::{CommandQueue, StopMode};

/// Handle to the worker thread of one `CommandQueue`.
///
/// - `request_stop()` で soft / hard stop を要求する
/// - `join()` / `wait()` で WorkerLoop の終了を待つ
pub struct WorkerHandle {
    queue: Arc<CommandQueue>,
    join: JoinHandle<Result<WorkerReport, CmdqError>>,
}

impl WorkerHandle {
    /// Start the worker loop on a dedicated, named thread.
    pub fn spawn(queue: Arc<CommandQueue>, config: &WorkerConfig) -> Result<Self, CmdqError> {
        config.validate()?;

        let worker = WorkerLoop::new(Arc::clone(&queue), config.failure_policy);
        let join = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || worker.run())
            .map_err(CmdqError::Spawn)?;
        debug!(thread = %config.thread_name, "worker thread spawned");

        Ok(Self { queue, join })
    }

    pub fn queue(&self) -> &Arc<CommandQueue> {
        &self.queue
    }

    pub fn state(&self) -> WorkerState {
        if self.join.is_finished() {
            WorkerState::Stopped
        } else {
            WorkerState::Running
        }
    }

    pub fn request_stop(&self, mode: StopMode) {
        self.queue.stop(mode);
    }

    /// Block until the worker loop returns.
    pub fn join(self) -> Result<WorkerReport, CmdqError> {
        self.join
            .join()
            .map_err(|payload| CmdqError::WorkerPanicked(panic_message(&*payload)))?
    }

    /// Await the worker loop from async code.
    pub async fn wait(self) -> Result<WorkerReport, CmdqError> {
        tokio::task::spawn_blocking(move || self.join())
            .await
            .map_err(|e| CmdqError::WorkerPanicked(e.to_string()))?
    }

    /// Request a stop and wait for the worker to finish.
    pub async fn stop_and_wait(self, mode: StopMode) -> Result<WorkerReport, CmdqError> {
        self.request_stop(mode);
        self.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Command;
    use std::sync::Mutex;
    use std::sync::mpsc;
    use std::time::Duration;

    type Log = Arc<Mutex<Vec<String>>>;

    fn hello(log: &Log, n: u32) -> impl Command {
        let log = Arc::clone(log);
        move || log.lock().unwrap().push(format!("Hello {n}"))
    }

    /// release されるまで execute() の中で止まる command
    fn gated(log: &Log, n: u32) -> (impl Command, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let log = Arc::clone(log);
        let command = move || {
            let _ = rx.recv();
            log.lock().unwrap().push(format!("Hello {n}"));
        };
        (command, tx)
    }

    async fn wait_until(mut cond: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !cond() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    fn hellos(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
        range.map(|n| format!("Hello {n}")).collect()
    }

    #[tokio::test]
    async fn soft_stop_scenario_drains_late_enqueues() {
        let queue = Arc::new(CommandQueue::new());
        let log: Log = Arc::default();
        let worker = WorkerHandle::spawn(Arc::clone(&queue), &WorkerConfig::default()).unwrap();

        queue.enqueue(hello(&log, 1));
        queue.enqueue(hello(&log, 2));
        let (third, release) = gated(&log, 3);
        queue.enqueue(third);
        wait_until(|| log.lock().unwrap().len() == 2 && queue.status().executing).await;

        // Hello 3 の実行中に soft stop → その後に積んだ分も drain される
        queue.soft_stop();
        queue.enqueue(hello(&log, 4));
        queue.enqueue(hello(&log, 5));
        release.send(()).unwrap();

        let report = worker.wait().await.unwrap();
        assert_eq!(*log.lock().unwrap(), hellos(1..=5));
        assert_eq!(report.executed, 5);
        assert!(queue.dequeue().is_none());
    }

    #[tokio::test]
    async fn hard_stop_before_start_executes_nothing() {
        let queue = Arc::new(CommandQueue::new());
        let log: Log = Arc::default();
        for n in 1..=5 {
            queue.enqueue(hello(&log, n));
        }
        queue.hard_stop();

        let worker = WorkerHandle::spawn(Arc::clone(&queue), &WorkerConfig::default()).unwrap();
        let report = worker.wait().await.unwrap();

        assert_eq!(report.executed, 0);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(queue.len(), 5);
    }

    #[tokio::test]
    async fn hard_stop_lets_in_flight_command_finish() {
        let queue = Arc::new(CommandQueue::new());
        let log: Log = Arc::default();
        let (first, release) = gated(&log, 1);
        queue.enqueue(first);
        queue.enqueue(hello(&log, 2));
        let worker = WorkerHandle::spawn(Arc::clone(&queue), &WorkerConfig::default()).unwrap();
        wait_until(|| queue.status().executing).await;

        worker.request_stop(StopMode::Hard);
        release.send(()).unwrap();
        let report = worker.wait().await.unwrap();

        assert_eq!(*log.lock().unwrap(), hellos(1..=1));
        assert_eq!(report.executed, 1);
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn state_moves_from_running_to_stopped() {
        let queue = Arc::new(CommandQueue::new());
        let worker = WorkerHandle::spawn(Arc::clone(&queue), &WorkerConfig::default()).unwrap();

        // 空キューで dequeue がブロックしている間は Running
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(worker.state(), WorkerState::Running);

        worker.request_stop(StopMode::Soft);
        wait_until(|| worker.state() == WorkerState::Stopped).await;

        let report = worker.join().unwrap();
        assert_eq!(report.executed, 0);
    }

    #[tokio::test]
    async fn worker_runs_on_named_thread() {
        let queue = Arc::new(CommandQueue::new());
        let seen: Arc<Mutex<Option<String>>> = Arc::default();
        let config = WorkerConfig {
            thread_name: "orders-worker".to_string(),
            ..WorkerConfig::default()
        };
        queue.enqueue({
            let seen = Arc::clone(&seen);
            move || *seen.lock().unwrap() = thread::current().name().map(str::to_string)
        });

        let worker = WorkerHandle::spawn(Arc::clone(&queue), &config).unwrap();
        worker.stop_and_wait(StopMode::Soft).await.unwrap();

        assert_eq!(seen.lock().unwrap().as_deref(), Some("orders-worker"));
    }

    #[test]
    fn spawn_rejects_invalid_thread_name() {
        let queue = Arc::new(CommandQueue::new());
        let config = WorkerConfig {
            thread_name: "bad\0name".to_string(),
            ..WorkerConfig::default()
        };

        let result = WorkerHandle::spawn(queue, &config);

        assert!(matches!(result, Err(CmdqError::Config(_))));
    }
}
