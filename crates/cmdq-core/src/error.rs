use std::path::PathBuf;

use thiserror::Error;

use crate::domain::CommandId;

/// Errors at the worker boundary. Queue operations themselves never fail.
#[derive(Debug, Error)]
pub enum CmdqError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("worker thread panicked: {0}")]
    WorkerPanicked(String),

    #[error("command {id} panicked: {message}")]
    CommandPanicked { id: CommandId, message: String },

    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),
}
