//! # Gateway設定・共有状態
//!
//! 環境変数からのコラボレータ構築とGatewayの共有状態の定義。
//! 本番向けバックエンドが未設定の場合はインメモリ実装に
//! フォールバックする（開発環境用）。

use std::sync::Arc;

use mintr_core::keystore::{KeyStore, MemoryKeyStore, PgKeyStore};
use mintr_core::metadata::{MemoryMetadataStorage, MetadataStorage, S3MetadataStorage};
use mintr_core::rpc::HttpSolanaRpc;
use mintr_core::{ActionService, KeyService};

/// Gatewayの共有状態。
pub struct AppState {
    /// アクションのオーケストレーションサービス
    pub actions: ActionService,
}

/// 環境変数から共有状態を構築する。
pub async fn build_state() -> anyhow::Result<AppState> {
    // 鍵ストア
    let key_store: Arc<dyn KeyStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let store = PgKeyStore::connect(&database_url).await?;
            store.ensure_schema().await?;
            tracing::info!("Postgres鍵ストアに接続しました");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!(
                "DATABASE_URLが未設定です。インメモリ鍵ストアを使用します（開発環境用）"
            );
            Arc::new(MemoryKeyStore::new())
        }
    };

    // ディスクリプタストレージ。S3系の環境変数が1つでも設定されていれば
    // S3実装を要求し、不足分はfrom_env側でエラーにする。
    let s3_configured =
        std::env::var("S3_BUCKET").is_ok() || std::env::var("ASSET_DOMAIN").is_ok();
    let metadata: Arc<dyn MetadataStorage> = if s3_configured {
        Arc::new(S3MetadataStorage::from_env()?)
    } else {
        tracing::warn!(
            "S3_BUCKET/ASSET_DOMAINが未設定です。インメモリのディスクリプタストレージを使用します（開発環境用）"
        );
        Arc::new(MemoryMetadataStorage::default())
    };

    // Solana RPC
    let rpc_url = std::env::var("SOLANA_RPC_URL")
        .unwrap_or_else(|_| "https://api.devnet.solana.com".to_string());
    tracing::info!(solana_rpc_url = %rpc_url, "Solana RPCエンドポイントを設定");
    let rpc = Arc::new(HttpSolanaRpc::new(&rpc_url));

    let actions = ActionService::new(KeyService::new(key_store), metadata, rpc);

    Ok(AppState { actions })
}
