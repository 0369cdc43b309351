//! App - キューを消費する側
//!
//! # 主要コンポーネント
//! - **WorkerLoop**: dequeue → execute → mark_execution_done のループ
//! - **WorkerHandle**: WorkerLoop を専用スレッドで起動・待機
//! - **StopCommand**: キュー経由で soft / hard stop を要求する command

pub mod control;
pub mod handle;
pub mod worker_loop;

pub use self::control::StopCommand;
pub use self::handle::WorkerHandle;
pub use self::worker_loop::{WorkerLoop, WorkerState};
