//! # インメモリ Metadata Publisher 実装
//!
//! ローカル開発・テスト用。ディスクリプタをプロセス内に保持し、
//! 実在しない配信ドメインのURLを返す。

use std::collections::HashMap;
use std::sync::Mutex;

use super::MetadataStorage;
use crate::error::CoreError;

/// インメモリのMetadata Publisher実装。
pub struct MemoryMetadataStorage {
    domain: String,
    objects: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryMetadataStorage {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    /// 保存済みディスクリプタの取得（テスト検証用）。
    pub fn get(&self, object_key: &str) -> Option<serde_json::Value> {
        self.objects.lock().ok()?.get(object_key).cloned()
    }
}

impl Default for MemoryMetadataStorage {
    fn default() -> Self {
        Self::new("assets.localhost")
    }
}

#[async_trait::async_trait]
impl MetadataStorage for MemoryMetadataStorage {
    async fn save_json(
        &self,
        account: &str,
        filename: &str,
        content: &serde_json::Value,
    ) -> Result<String, CoreError> {
        let object_key = format!("{account}/{filename}");

        let mut objects = self
            .objects
            .lock()
            .map_err(|e| CoreError::Storage(format!("インメモリストアのロックに失敗: {e}")))?;
        objects.insert(object_key, content.clone());

        Ok(format!(
            "https://{}/{}/{}",
            self.domain,
            account,
            urlencoding::encode(filename)
        ))
    }
}
