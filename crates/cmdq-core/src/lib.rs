//! cmdq-core
//!
//! Single-consumer command queue with a two-tier shutdown.
//!
//! # モジュール構成
//! - **domain**: Command trait, CommandId, QueuedCommand
//! - **ports**: Clock, IdGenerator（テスト時に差し替える外部依存）
//! - **queue**: CommandQueue（Mutex + Condvar の FIFO、soft / hard stop）
//! - **app**: WorkerLoop, WorkerHandle, StopCommand
//! - **config**: WorkerConfig, FailurePolicy
//! - **observability**: QueueStatus, WorkerReport, tracing の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod observability;
pub mod ports;
pub mod queue;

pub use app::{StopCommand, WorkerHandle, WorkerLoop, WorkerState};
pub use config::{FailurePolicy, WorkerConfig};
pub use domain::{Command, CommandId, QueuedCommand};
pub use error::CmdqError;
pub use observability::{QueueStatus, WorkerReport};
pub use queue::{CommandQueue, StopMode};
