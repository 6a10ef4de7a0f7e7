//! # Postgres Key Store 実装
//!
//! 1名前=1行。一意性は`INSERT .. ON CONFLICT DO NOTHING`の
//! 単一ステートメントで保証する。

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::{KeyRecord, KeyStore, PutOutcome};
use crate::error::CoreError;

/// PostgresによるKey Store実装。
pub struct PgKeyStore {
    pool: PgPool,
}

impl PgKeyStore {
    /// 接続プールを張って構築する。
    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| CoreError::Storage(format!("データベース接続に失敗: {e}")))?;
        Ok(Self { pool })
    }

    /// 既存プールから構築する。
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// keysテーブルを作成する（存在しない場合のみ）。起動時に一度呼ぶ。
    pub async fn ensure_schema(&self) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS keys (
                name        TEXT PRIMARY KEY,
                public_key  TEXT NOT NULL,
                private_key BYTEA NOT NULL,
                created_at  TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CoreError::Storage(format!("スキーマ作成に失敗: {e}")))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyStore for PgKeyStore {
    /// 条件付き挿入。行が挿入されなかった場合がConflict。
    async fn put_if_absent(&self, record: &KeyRecord) -> Result<PutOutcome, CoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO keys (name, public_key, private_key, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&record.name)
        .bind(&record.public_key)
        .bind(&record.private_key)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| CoreError::Storage(format!("鍵レコードの挿入に失敗: {e}")))?;

        if result.rows_affected() == 0 {
            Ok(PutOutcome::Conflict)
        } else {
            Ok(PutOutcome::Inserted)
        }
    }

    async fn get(&self, name: &str) -> Result<Option<KeyRecord>, CoreError> {
        let record = sqlx::query_as::<_, KeyRecord>(
            r#"
            SELECT name, public_key, private_key, created_at
            FROM keys
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CoreError::Storage(format!("鍵レコードの検索に失敗: {e}")))?;

        Ok(record)
    }
}
