//! Domain model (command trait, ids, envelope).

pub mod command;
pub mod envelope;
pub mod ids;

pub use self::command::Command;
pub use self::envelope::QueuedCommand;
pub use self::ids::CommandId;
