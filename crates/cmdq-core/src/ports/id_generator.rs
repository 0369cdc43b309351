//! IdGenerator port - CommandId 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: Clock の時刻 + 乱数で ULID を作る

use crate::domain::CommandId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は enqueue ごとに CommandId を払い出す
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数の producer スレッドから呼ばれる）
pub trait IdGenerator: Send + Sync {
    fn generate_command_id(&self) -> CommandId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// FixedClock と組み合わせると timestamp 部分が固定になり、テストで扱いやすい。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_command_id(&self) -> CommandId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        CommandId::from(ulid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let ids: HashSet<CommandId> = (0..100).map(|_| id_gen.generate_command_id()).collect();

        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn ulid_generator_with_fixed_clock_shares_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_command_id();
        let id2 = id_gen.generate_command_id();

        // ランダム部分があるので ID は異なる
        assert_ne!(id1, id2);

        // timestamp 部分は同じ
        assert_eq!(id1.as_ulid().timestamp_ms(), id2.as_ulid().timestamp_ms());
        assert_eq!(
            id1.as_ulid().timestamp_ms(),
            fixed_time.timestamp_millis() as u64
        );
    }
}
