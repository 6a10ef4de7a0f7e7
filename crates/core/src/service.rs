//! # Action Service
//!
//! アクション種別ごとのオーケストレーション:
//! 署名鍵の解決・生成 → （アセットの場合）ディスクリプタ公開 →
//! 直近ブロックハッシュ取得 → トランザクション構築 → レスポンス封入。
//!
//! コラボレータはすべてコンストラクタで注入する。グローバル状態はない。

use std::str::FromStr;
use std::sync::Arc;

use base64::Engine;
use solana_sdk::pubkey::Pubkey;

use mintr_types::{
    ActionDefinition, ActionLinks, ActionParameter, ActionTransactionResponse,
    CreateAssetRequest, CreateCollectionRequest, LinkedAction,
};

use crate::error::CoreError;
use crate::identity::Identity;
use crate::keys::KeyService;
use crate::metadata::MetadataStorage;
use crate::rpc::SolanaRpc;
use crate::solana_tx;

/// Base64エンジン（Standard）
fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

/// アクションのオーケストレーションを担うサービス。
pub struct ActionService {
    keys: KeyService,
    metadata: Arc<dyn MetadataStorage>,
    rpc: Arc<dyn SolanaRpc>,
}

impl ActionService {
    pub fn new(
        keys: KeyService,
        metadata: Arc<dyn MetadataStorage>,
        rpc: Arc<dyn SolanaRpc>,
    ) -> Self {
        Self {
            keys,
            metadata,
            rpc,
        }
    }

    /// 名前に対応する署名鍵を解決する。
    ///
    /// 既存の鍵があればそれを再利用し、なければ新規生成する。アセット／
    /// コレクション名がそのまま署名権限のルックアップキーとなるため、
    /// 同名の2つのリクエストは1つの権限を共有する。生成自体はストア層の
    /// アトミックな条件付き挿入で行われ、同名同時リクエストの敗者には
    /// Conflictがそのまま返る（リトライしない）。
    async fn resolve_identity(&self, name: &str) -> Result<Identity, CoreError> {
        match self.keys.get_key(name).await {
            Ok(identity) => {
                tracing::info!(
                    name = %name,
                    public_key = %identity.public_key(),
                    "既存の署名鍵を再利用します"
                );
                Ok(identity)
            }
            Err(CoreError::NotFound { .. }) => self.keys.generate_new_key(name).await,
            Err(e) => Err(e),
        }
    }

    /// コレクション作成アクション。
    ///
    /// 返却されるトランザクションにはサービス保持の署名者の署名のみが
    /// 適用されており、呼び出し側の署名は下流で追加される。
    pub async fn create_collection(
        &self,
        request: &CreateCollectionRequest,
    ) -> Result<ActionTransactionResponse, CoreError> {
        tracing::info!(
            name = %request.name,
            account = %request.account,
            supply = request.supply,
            price = request.price,
            "コレクション作成アクション"
        );

        let payer = parse_account(&request.account)?;
        let identity = self.resolve_identity(&request.name).await?;

        let blockhash = self.rpc.latest_blockhash().await.map_err(|e| {
            tracing::error!(
                name = %request.name,
                account = %request.account,
                error = %e,
                "ブロックハッシュの取得に失敗"
            );
            e
        })?;

        let tx = solana_tx::build_create_collection_tx(
            identity.keypair(),
            &payer,
            &request.name,
            &request.url,
            request.supply,
            &blockhash,
        )?;
        let tx_bytes = solana_tx::serialize_transaction(&tx)?;

        Ok(ActionTransactionResponse {
            kind: "transaction".to_string(),
            transaction: b64().encode(&tx_bytes),
            message: Some(format!(
                "Create collection {} (supply {}, mint price {} SOL)",
                request.name, request.supply, request.price
            )),
        })
    }

    /// NFT作成アクション。
    ///
    /// ディスクリプタの公開はトランザクション構築より前に行う。公開に
    /// 失敗した場合、トランザクションは構築されない。返却される
    /// トランザクションはサービス側の署名が完了しており、呼び出し側の
    /// 手数料支払者署名のみが未了で残る。
    pub async fn create_asset(
        &self,
        request: &CreateAssetRequest,
    ) -> Result<ActionTransactionResponse, CoreError> {
        tracing::info!(
            name = %request.name,
            account = %request.account,
            "NFT作成アクション"
        );

        let payer = parse_account(&request.account)?;
        let identity = self.resolve_identity(&request.name).await?;

        let descriptor = serde_json::json!({
            "name": request.name,
            "description": format!("1 of 1 NFT {}", request.name),
            "image": request.url,
        });
        let descriptor_url = self
            .metadata
            .save_json(&request.account, &format!("{}.json", request.name), &descriptor)
            .await
            .map_err(|e| {
                tracing::error!(
                    name = %request.name,
                    account = %request.account,
                    error = %e,
                    "ディスクリプタの公開に失敗"
                );
                e
            })?;

        let blockhash = self.rpc.latest_blockhash().await.map_err(|e| {
            tracing::error!(
                name = %request.name,
                account = %request.account,
                error = %e,
                "ブロックハッシュの取得に失敗"
            );
            e
        })?;

        let tx = solana_tx::build_create_asset_tx(
            identity.keypair(),
            &payer,
            &request.name,
            &descriptor_url,
            &blockhash,
        )?;
        let tx_bytes = solana_tx::serialize_transaction(&tx)?;

        Ok(ActionTransactionResponse {
            kind: "transaction".to_string(),
            transaction: b64().encode(&tx_bytes),
            message: Some(format!("Create NFT {}", request.name)),
        })
    }

    // -----------------------------------------------------------------------
    // アクション定義（純粋データ、副作用なし）
    // -----------------------------------------------------------------------

    /// NFT作成アクションの定義ドキュメント。
    pub fn nft_action_definition() -> ActionDefinition {
        ActionDefinition {
            icon: "https://mintr.click/create-nft-banner.webp".to_string(),
            title: "NFT creation".to_string(),
            description: "Create a 1 of 1 NFT".to_string(),
            label: "Create a NFT".to_string(),
            links: ActionLinks {
                actions: vec![LinkedAction {
                    kind: "message".to_string(),
                    label: "Create NFT 🚀".to_string(),
                    href: "/collections/create-nft?name={name}&url={url}".to_string(),
                    parameters: vec![
                        ActionParameter {
                            name: "name".to_string(),
                            label: "NFT name".to_string(),
                            required: true,
                            kind: "text".to_string(),
                            pattern: Some("[a-zA-Z0-9]{4,50}".to_string()),
                            pattern_description: Some("4 to 50 letters or digits".to_string()),
                            min: None,
                        },
                        ActionParameter {
                            name: "url".to_string(),
                            label: "Image url".to_string(),
                            required: true,
                            kind: "url".to_string(),
                            pattern: None,
                            pattern_description: None,
                            min: None,
                        },
                    ],
                }],
            },
        }
    }

    /// コレクション作成アクションの定義ドキュメント。
    pub fn one_of_action_definition() -> ActionDefinition {
        ActionDefinition {
            icon: "https://mintr.click/create-one-ob-banner.webp".to_string(),
            title: "NFT collection creation".to_string(),
            description: "Create a NFT collection".to_string(),
            label: "Create a NFT collection".to_string(),
            links: ActionLinks {
                actions: vec![LinkedAction {
                    kind: "message".to_string(),
                    label: "Create collection 🚀".to_string(),
                    href: "/collections/create-one-of?price={price}&name={name}&url={url}&supply={supply}"
                        .to_string(),
                    parameters: vec![
                        ActionParameter {
                            name: "name".to_string(),
                            label: "Collection name".to_string(),
                            required: true,
                            kind: "text".to_string(),
                            pattern: Some("[a-zA-Z0-9]{4,10}".to_string()),
                            pattern_description: Some("4 to 10 letters or digits".to_string()),
                            min: None,
                        },
                        ActionParameter {
                            name: "url".to_string(),
                            label: "Image url".to_string(),
                            required: true,
                            kind: "url".to_string(),
                            pattern: None,
                            pattern_description: None,
                            min: None,
                        },
                        ActionParameter {
                            name: "supply".to_string(),
                            label: "Collection supply".to_string(),
                            required: true,
                            kind: "number".to_string(),
                            pattern: None,
                            pattern_description: None,
                            min: Some(1.0),
                        },
                        ActionParameter {
                            name: "price".to_string(),
                            label: "Mint price".to_string(),
                            required: true,
                            kind: "number".to_string(),
                            pattern: None,
                            pattern_description: None,
                            min: Some(0.0),
                        },
                    ],
                }],
            },
        }
    }
}

/// 呼び出し側アカウントのBase58デコード。
///
/// 形状検証はルート層で済んでいるため、ここでの失敗は内部エラー扱い。
fn parse_account(account: &str) -> Result<Pubkey, CoreError> {
    Pubkey::from_str(account)
        .map_err(|e| CoreError::Internal(format!("accountのデコードに失敗: {e}")))
}
