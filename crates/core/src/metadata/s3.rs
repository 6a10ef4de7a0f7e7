//! # S3互換 Metadata Publisher 実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIにディスクリプタを書き込み、
//! 配信ドメイン上の公開URLを返す。

use chrono::{Datelike, Utc};

use super::MetadataStorage;
use crate::error::CoreError;

/// S3互換ストレージによるMetadata Publisher実装。
pub struct S3MetadataStorage {
    bucket: s3::Bucket,
    /// 公開URL生成に使う配信ドメイン（CDN等）
    domain: String,
}

impl S3MetadataStorage {
    pub fn new(bucket: s3::Bucket, domain: String) -> Self {
        Self { bucket, domain }
    }

    /// 環境変数からS3互換バケットを初期化する。
    fn init_bucket(
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        bucket_name: &str,
    ) -> anyhow::Result<s3::Bucket> {
        let region = s3::Region::Custom {
            region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint: endpoint.to_string(),
        };

        let credentials = s3::creds::Credentials::new(
            Some(access_key),
            Some(secret_key),
            None,
            None,
            None,
        )?;

        let bucket = s3::Bucket::new(bucket_name, region, credentials)?.with_path_style();

        Ok(*bucket)
    }

    /// 環境変数から構築する。
    ///
    /// `S3_BUCKET`と`ASSET_DOMAIN`は必須。エンドポイントと認証情報は
    /// ローカルMinIO向けのデフォルトを持つ。
    pub fn from_env() -> anyhow::Result<Self> {
        let bucket_name = std::env::var("S3_BUCKET")
            .map_err(|_| anyhow::anyhow!("S3_BUCKETが設定されていません"))?;
        let domain = std::env::var("ASSET_DOMAIN")
            .map_err(|_| anyhow::anyhow!("ASSET_DOMAINが設定されていません"))?;
        let endpoint = std::env::var("S3_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let access_key =
            std::env::var("S3_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key =
            std::env::var("S3_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());

        let bucket = Self::init_bucket(&endpoint, &access_key, &secret_key, &bucket_name)?;

        Ok(Self::new(bucket, domain))
    }
}

#[async_trait::async_trait]
impl MetadataStorage for S3MetadataStorage {
    /// ディスクリプタを日付パーティション付きキーに保存し、公開URLを返す。
    ///
    /// キーは `<account>/<年>/<月>/<日>/<filename>`。URL側のファイル名のみ
    /// パーセントエンコードする。
    async fn save_json(
        &self,
        account: &str,
        filename: &str,
        content: &serde_json::Value,
    ) -> Result<String, CoreError> {
        let today = Utc::now();
        let directory = format!(
            "{}/{}/{}/{}",
            account,
            today.year(),
            today.month(),
            today.day()
        );
        let object_key = format!("{directory}/{filename}");

        let body = serde_json::to_vec(content)
            .map_err(|e| CoreError::Internal(format!("ディスクリプタのシリアライズに失敗: {e}")))?;

        let response = self
            .bucket
            .put_object_with_content_type(&object_key, &body, "application/json")
            .await
            .map_err(|e| CoreError::Storage(format!("ディスクリプタの保存に失敗: {e}")))?;

        if response.status_code() != 200 {
            return Err(CoreError::Storage(format!(
                "ディスクリプタの保存がHTTP {}で失敗しました",
                response.status_code()
            )));
        }

        let url = format!(
            "https://{}/{}/{}",
            self.domain,
            directory,
            urlencoding::encode(filename)
        );

        tracing::info!(
            account = %account,
            url = %url,
            "ディスクリプタを保存しました"
        );

        Ok(url)
    }
}
