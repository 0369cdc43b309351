//! Ports - 差し替え可能な外部依存
//!
//! キュー本体は時刻と ID 生成だけを外部に依存します。
//! どちらも trait にしておき、テストでは固定値を注入します。

pub mod clock;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
