//! Command identifiers.
//!
//! # ULID ベースの ID
//! enqueue 時に 1 件ごとに CommandId を払い出します。
//! ULID は先頭が timestamp なので、同一 Clock 上では払い出し順にソートできます。
//! ログ上で「どのコマンドがいつ積まれ、いつ実行されたか」を追うためのものであり、
//! キューの FIFO 順序そのものは VecDeque が保証します（ID には依存しない）。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Identifier of one enqueued command.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(Ulid);

impl CommandId {
    const PREFIX: &'static str = "cmd-";

    /// ULID から CommandId を作成
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// 内部の ULID を取得
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for CommandId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_has_prefix() {
        let ulid = Ulid::new();
        let id = CommandId::from_ulid(ulid);

        assert_eq!(id.as_ulid(), ulid);
        assert_eq!(id.to_string(), format!("cmd-{ulid}"));
    }

    #[test]
    fn ids_are_sortable_by_time() {
        let id1 = CommandId::from_ulid(Ulid::from_parts(1_000, 42));
        let id2 = CommandId::from_ulid(Ulid::from_parts(2_000, 7));

        assert!(id1 < id2);
    }

    #[test]
    fn serializes_as_plain_ulid_string() {
        let ulid = Ulid::new();
        let id: CommandId = ulid.into();

        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, format!("\"{ulid}\""));

        let deserialized: CommandId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }
}
