//! # エンドポイント統合テスト
//!
//! インメモリのコラボレータを注入した実ルータをローカルリスナーで起動し、
//! HTTP越しに駆動する。

use std::sync::Arc;

use base64::Engine;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;

use mintr_core::keystore::MemoryKeyStore;
use mintr_core::metadata::MemoryMetadataStorage;
use mintr_core::rpc::SolanaRpc;
use mintr_core::{ActionService, CoreError, KeyService};

use crate::config::AppState;

/// テスト用RPCモック。ネットワークなしでブロックハッシュを返す。
struct StaticRpc;

#[async_trait::async_trait]
impl SolanaRpc for StaticRpc {
    async fn latest_blockhash(&self) -> Result<Hash, CoreError> {
        Ok(Hash::new_unique())
    }
}

/// テスト用サーバーを起動し、ベースURLを返す。
async fn start_test_server() -> String {
    let actions = ActionService::new(
        KeyService::new(Arc::new(MemoryKeyStore::new())),
        Arc::new(MemoryMetadataStorage::default()),
        Arc::new(StaticRpc),
    );
    let state = Arc::new(AppState { actions });
    let app = crate::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}

fn decode_tx(encoded: &str) -> Transaction {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    bincode::deserialize(&bytes).unwrap()
}

async fn post_create_nft(
    base: &str,
    name: &str,
    url: &str,
    account: &str,
) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/collections/create-nft?name={name}&url={url}"))
        .json(&serde_json::json!({ "account": account }))
        .send()
        .await
        .unwrap()
}

/// GET定義エンドポイントがパラメータスキーマを返すこと
#[tokio::test]
async fn test_get_definitions() {
    let base = start_test_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{base}/collections/create-nft"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["links"]["actions"][0]["parameters"].as_array().unwrap().len(), 2);

    let response = client
        .get(format!("{base}/collections/create-one-of"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["links"]["actions"][0]["parameters"].as_array().unwrap().len(), 4);
}

/// NFT作成のエンドツーエンド: 200 + transactionレスポンス。
/// 同名での再呼び出しも200で、同じ署名権限を再利用すること。
#[tokio::test]
async fn test_create_nft_end_to_end() {
    let base = start_test_server().await;
    let account = Pubkey::new_unique().to_string();

    let response = post_create_nft(&base, "Rocket", "https://img/x.png", &account).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["type"], "transaction");
    let first_tx = decode_tx(body["transaction"].as_str().unwrap());
    assert!(!first_tx.message.account_keys.is_empty());

    // 再呼び出し: 新しいトランザクション、同じ署名権限
    let response = post_create_nft(&base, "Rocket", "https://img/x.png", &account).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["type"], "transaction");
    let second_tx = decode_tx(body["transaction"].as_str().unwrap());

    // 署名者順はpayer, assetの順。assetスロットが署名権限。
    assert_eq!(first_tx.message.account_keys[1], second_tx.message.account_keys[1]);
}

/// コレクション作成のエンドツーエンド: payerのみ未署名で返ること
#[tokio::test]
async fn test_create_one_of_end_to_end() {
    let base = start_test_server().await;
    let account = Pubkey::new_unique().to_string();

    let response = reqwest::Client::new()
        .post(format!(
            "{base}/collections/create-one-of?name=Rockets&url=https://img/r.png&supply=10&price=0"
        ))
        .json(&serde_json::json!({ "account": account }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["type"], "transaction");
    let tx = decode_tx(body["transaction"].as_str().unwrap());

    assert_eq!(tx.message.account_keys[0].to_string(), account);
    assert_eq!(tx.signatures[0], solana_sdk::signature::Signature::default());
    assert_ne!(tx.signatures[1], solana_sdk::signature::Signature::default());
}

/// 形状検証エラーが400 + `{message}`で返ること
#[tokio::test]
async fn test_validation_errors() {
    let base = start_test_server().await;
    let account = Pubkey::new_unique().to_string();
    let client = reqwest::Client::new();

    // 名前が短すぎる（3文字）
    let response = post_create_nft(&base, "abc", "https://img/x.png", &account).await;
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("name"));

    // 名前が長すぎる（51文字）
    let long_name = "a".repeat(51);
    let response = post_create_nft(&base, &long_name, "https://img/x.png", &account).await;
    assert_eq!(response.status(), 400);

    // 境界値は受理される（4文字・50文字）
    let response = post_create_nft(&base, "abcd", "https://img/x.png", &account).await;
    assert_eq!(response.status(), 200);
    let max_name = "b".repeat(50);
    let response = post_create_nft(&base, &max_name, "https://img/x.png", &account).await;
    assert_eq!(response.status(), 200);

    // URLが短すぎる
    let response = post_create_nft(&base, "Rocket", "http", &account).await;
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("url"));

    // ボディなし
    let response = client
        .post(format!(
            "{base}/collections/create-nft?name=Rocket&url=https://img/x.png"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "body is missing");

    // supplyの小数・ゼロは拒否
    for supply in ["10.5", "0"] {
        let response = client
            .post(format!(
                "{base}/collections/create-one-of?name=Rockets&url=https://img/r.png&supply={supply}&price=0"
            ))
            .json(&serde_json::json!({ "account": account }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["message"].as_str().unwrap().contains("supply"));
    }

    // 負の価格は拒否
    let response = client
        .post(format!(
            "{base}/collections/create-one-of?name=Rockets&url=https://img/r.png&supply=10&price=-1"
        ))
        .json(&serde_json::json!({ "account": account }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("price"));
}

/// 未定義ルートが404 + メソッドとパスを含むメッセージで返ること
#[tokio::test]
async fn test_unknown_route() {
    let base = start_test_server().await;

    let response = reqwest::Client::new()
        .get(format!("{base}/nonexistent"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("GET"));
    assert!(message.contains("/nonexistent"));
}
