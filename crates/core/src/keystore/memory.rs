//! # インメモリ Key Store 実装
//!
//! ローカル開発・テスト用。プロセス再起動で消える。
//! `HashMap::entry`により条件付き挿入と同じ最大1回書き込みの
//! セマンティクスを持つ。

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{KeyRecord, KeyStore, PutOutcome};
use crate::error::CoreError;

/// インメモリのKey Store実装。
#[derive(Default)]
pub struct MemoryKeyStore {
    records: Mutex<HashMap<String, KeyRecord>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyStore for MemoryKeyStore {
    async fn put_if_absent(&self, record: &KeyRecord) -> Result<PutOutcome, CoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| CoreError::Storage(format!("インメモリストアのロックに失敗: {e}")))?;

        match records.entry(record.name.clone()) {
            Entry::Occupied(_) => Ok(PutOutcome::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(PutOutcome::Inserted)
            }
        }
    }

    async fn get(&self, name: &str) -> Result<Option<KeyRecord>, CoreError> {
        let records = self
            .records
            .lock()
            .map_err(|e| CoreError::Storage(format!("インメモリストアのロックに失敗: {e}")))?;
        Ok(records.get(name).cloned())
    }
}
