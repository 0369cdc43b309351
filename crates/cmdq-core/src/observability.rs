//! Status views and tracing setup.

use std::sync::Once;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Point-in-time view of a `CommandQueue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub pending: usize,
    pub executing: bool,
    pub hard_stop_requested: bool,
    pub soft_stop_requested: bool,
}

/// What one worker loop did between start and stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerReport {
    /// Commands whose execute() returned normally.
    pub executed: usize,
    /// Commands whose execute() panicked.
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub stopped_at: DateTime<Utc>,
}

static INIT_TRACING: Once = Once::new();

/// Install a fmt subscriber. `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_tracing(debug: bool) {
    INIT_TRACING.call_once(|| {
        let default_filter = if debug {
            "cmdq=debug,cmdq_core=debug"
        } else {
            "cmdq=info,cmdq_core=info"
        };
        // 既に global subscriber がある場合（テストなど）は無視
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .try_init();
    });
}
