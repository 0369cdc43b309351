//! Queue module: lock-protected state and the command queue itself.

mod command_queue;
mod state;

pub use command_queue::{CommandQueue, StopMode};
