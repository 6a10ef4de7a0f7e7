//! # Solana RPC クライアント
//!
//! トランザクションに載せる直近ブロックハッシュの取得。ブロックハッシュは
//! リクエストごとに新しく取得し、リクエスト間でキャッシュしない（古い値を
//! 使うと呼び出し側のブロードキャストが失効で拒否されるため）。

use std::str::FromStr;

use solana_sdk::hash::Hash;

use crate::error::CoreError;

/// Solana RPCの抽象インターフェース。
#[async_trait::async_trait]
pub trait SolanaRpc: Send + Sync {
    /// 直近のブロックハッシュを取得する。
    async fn latest_blockhash(&self) -> Result<Hash, CoreError>;
}

/// JSON-RPCによるSolana RPC実装。
pub struct HttpSolanaRpc {
    url: String,
    client: reqwest::Client,
}

impl HttpSolanaRpc {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl SolanaRpc for HttpSolanaRpc {
    async fn latest_blockhash(&self) -> Result<Hash, CoreError> {
        let rpc_request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getLatestBlockhash",
            "params": [{"commitment": "finalized"}]
        });

        let response = self
            .client
            .post(&self.url)
            .json(&rpc_request)
            .send()
            .await
            .map_err(|e| CoreError::Rpc(format!("RPC送信失敗: {e}")))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CoreError::Rpc(format!("RPCレスポンスのパースに失敗: {e}")))?;

        if let Some(error) = body.get("error") {
            return Err(CoreError::Rpc(format!(
                "getLatestBlockhashが失敗しました: {error}"
            )));
        }

        let blockhash = body
            .pointer("/result/value/blockhash")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                CoreError::Rpc("RPCレスポンスにblockhashがありません".to_string())
            })?;

        Hash::from_str(blockhash)
            .map_err(|e| CoreError::Rpc(format!("blockhashのBase58デコードに失敗: {e}")))
    }
}
