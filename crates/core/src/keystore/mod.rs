//! # Key Store
//!
//! 名前をキーとする耐久性のある鍵レコードストアの抽象インターフェース。
//! 1つの名前に対して書き込みは最大1回。この保証は各バックエンドの
//! アトミックな条件付き挿入のみで成立させる（存在チェック＋書き込みの
//! 2段階に分解してはならない）。
//!
//! 本番実装は`postgres`、ローカル開発・テスト用実装は`memory`を参照。

pub mod memory;
pub mod postgres;

pub use memory::MemoryKeyStore;
pub use postgres::PgKeyStore;

use chrono::{DateTime, Utc};

use crate::error::CoreError;

/// 永続化される鍵レコード。
#[derive(Clone, sqlx::FromRow)]
pub struct KeyRecord {
    /// 主キー。アセット／コレクション名。
    pub name: String,
    /// Base58エンコードされた公開鍵
    pub public_key: String,
    /// 秘密鍵バイト列（64バイト）。外部レスポンスには決して含めない。
    pub private_key: Vec<u8>,
    /// 作成時刻
    pub created_at: DateTime<Utc>,
}

// 秘密鍵を含むためDebugは手書き。
impl std::fmt::Debug for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRecord")
            .field("name", &self.name)
            .field("public_key", &self.public_key)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// 条件付き挿入の結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// 新規挿入に成功した
    Inserted,
    /// 同名のレコードが既に存在した（挿入は行われていない）
    Conflict,
}

/// Key Storeの抽象インターフェース。
///
/// 同名同時リクエストに対する安全性は`put_if_absent`のアトミック性に
/// 全面的に委譲される。
#[async_trait::async_trait]
pub trait KeyStore: Send + Sync {
    /// レコードが存在しない場合のみ挿入する。
    ///
    /// 競合判定はバックエンド側で単一操作として行われる。
    async fn put_if_absent(&self, record: &KeyRecord) -> Result<PutOutcome, CoreError>;

    /// 名前による点検索。
    async fn get(&self, name: &str) -> Result<Option<KeyRecord>, CoreError>;
}
