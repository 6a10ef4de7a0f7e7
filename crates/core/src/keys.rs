//! # Key Service
//!
//! 名前ごとのSolanaキーペアの生成・永続化・取得。
//!
//! 生成は「新規キーペア生成 → 条件付き挿入」の順で行い、挿入が競合した
//! 場合は生成済みの鍵素材を破棄してConflictを返す。リトライも上書きも
//! 行わない。同名同時リクエストが異なる鍵で互いを静かに上書きする事態を
//! この単一書き込み保証で排除する。

use std::sync::Arc;

use chrono::Utc;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;

use crate::error::CoreError;
use crate::identity::Identity;
use crate::keystore::{KeyRecord, KeyStore, PutOutcome};

/// 署名鍵の生成と取得を担うサービス。
pub struct KeyService {
    store: Arc<dyn KeyStore>,
}

impl KeyService {
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self { store }
    }

    /// 新規キーペアを生成し、`name`をキーとして永続化する。
    ///
    /// 同名のレコードが既に存在する場合はConflict。生成した鍵素材は
    /// 破棄され、別名での再試行や上書きは行わない。成功時は秘密鍵を
    /// 含む完全なIdentityを返す（トランザクション署名に即時使用する
    /// ため。秘密鍵がこのストア以外に書かれることはない）。
    pub async fn generate_new_key(&self, name: &str) -> Result<Identity, CoreError> {
        let keypair = Keypair::new();
        let created_at = Utc::now();
        let record = KeyRecord {
            name: name.to_string(),
            public_key: keypair.pubkey().to_string(),
            private_key: keypair.to_bytes().to_vec(),
            created_at,
        };

        match self.store.put_if_absent(&record).await? {
            PutOutcome::Inserted => {
                tracing::info!(
                    name = %name,
                    public_key = %record.public_key,
                    "新規署名鍵を生成・保存しました"
                );
                Ok(Identity::new(name.to_string(), keypair, created_at))
            }
            PutOutcome::Conflict => {
                tracing::warn!(name = %name, "署名鍵が既に存在するため生成分を破棄します");
                Err(CoreError::Conflict {
                    name: name.to_string(),
                })
            }
        }
    }

    /// 名前による点検索。存在しない場合はNotFound。
    pub async fn get_key(&self, name: &str) -> Result<Identity, CoreError> {
        let record = self
            .store
            .get(name)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                name: name.to_string(),
            })?;

        // 保存済みバイト列からキーペアを復元する。復元不能なレコードは
        // 取得側の入力起因ではないため内部エラー扱い。
        let keypair = Keypair::from_bytes(&record.private_key)
            .map_err(|e| CoreError::Internal(format!("鍵レコードの復元に失敗: {e}")))?;

        Ok(Identity::new(record.name, keypair, record.created_at))
    }
}
