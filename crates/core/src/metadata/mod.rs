//! # Metadata Publisher
//!
//! NFTメタデータディスクリプタをオブジェクトストレージに公開するための
//! 抽象インターフェース。書き込みは1ディスクリプタにつき1回で、返却URLが
//! そのままミントされるアセットのオンチェーン参照フィールドに埋め込まれる。
//!
//! S3互換ストレージ実装は`s3`、ローカル開発・テスト用実装は`memory`を参照。

pub mod memory;
pub mod s3;

pub use memory::MemoryMetadataStorage;
pub use s3::S3MetadataStorage;

use crate::error::CoreError;

/// Metadata Publisherの抽象インターフェース。
///
/// 運用者はS3互換ストレージ（AWS S3, MinIO, Cloudflare R2等）やその他の
/// 公開読み取り可能なバックエンドを実装として選択できる。
#[async_trait::async_trait]
pub trait MetadataStorage: Send + Sync {
    /// JSONディスクリプタを保存し、公開URLを返す。
    ///
    /// - `account`: 呼び出し側のアカウント。キーのプレフィックスになる。
    /// - `filename`: オブジェクトのファイル名（例: `Rocket.json`）
    /// - `content`: ディスクリプタ本体
    async fn save_json(
        &self,
        account: &str,
        filename: &str,
        content: &serde_json::Value,
    ) -> Result<String, CoreError>;
}
