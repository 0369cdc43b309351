//! Worker configuration.
//!
//! JSON で読み込めるようにしておく（CLI の `--config`）。
//! 省略したフィールドは Default で埋まる。

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CmdqError;

/// What the worker does when a command panics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the panic, count it, keep draining.
    #[default]
    Isolate,

    /// Stop the worker and report `CmdqError::CommandPanicked`.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkerConfig {
    /// Name of the dedicated worker thread.
    pub thread_name: String,

    pub failure_policy: FailurePolicy,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "cmdq-worker".to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl WorkerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, CmdqError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CmdqError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, CmdqError> {
        let json = std::fs::read_to_string(path).map_err(|source| CmdqError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// std::thread::Builder::spawn は NUL を含む名前で panic するので先に弾く
    pub fn validate(&self) -> Result<(), CmdqError> {
        if self.thread_name.is_empty() {
            return Err(CmdqError::Config("thread_name must not be empty".to_string()));
        }
        if self.thread_name.contains('\0') {
            return Err(CmdqError::Config(
                "thread_name must not contain NUL".to_string(),
            ));
        }
        Ok(())
    }
}
