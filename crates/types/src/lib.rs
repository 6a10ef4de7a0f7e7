//! # Mintr Action API 共有型定義
//!
//! Solana Actionsプロトコルのワイヤ型と、アクション間で共有する
//! リクエスト構造体を提供する。
//!
//! ## エンコーディング規則
//! - Base58: Solanaアドレス、公開鍵
//! - Base64: シリアライズ済みトランザクション

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// アクション定義ドキュメント (GET レスポンス)
// ---------------------------------------------------------------------------

/// アクション定義ドキュメント。ウォレットがフォームを描画するために
/// GETエンドポイントから配信される静的スキーマ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// バナー画像URL
    pub icon: String,
    /// アクションのタイトル
    pub title: String,
    /// アクションの説明文
    pub description: String,
    /// 実行ボタンのラベル
    pub label: String,
    /// 実行可能なアクション一覧
    pub links: ActionLinks,
}

/// アクション定義内のリンク集合。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

/// 個々の実行可能アクション。hrefには`{name}`等のプレースホルダを含む。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAction {
    /// アクション種別
    #[serde(rename = "type")]
    pub kind: String,
    /// 実行ボタンのラベル
    pub label: String,
    /// プレースホルダ付きのPOST先テンプレート
    pub href: String,
    /// 入力パラメータのスキーマ
    pub parameters: Vec<ActionParameter>,
}

/// アクション入力パラメータのスキーマ。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionParameter {
    /// クエリパラメータ名
    pub name: String,
    /// フォーム上の表示ラベル
    pub label: String,
    /// 必須入力か
    pub required: bool,
    /// 入力種別 ("text", "url", "number")
    #[serde(rename = "type")]
    pub kind: String,
    /// 入力値の正規表現パターン
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// パターンの説明文
    #[serde(rename = "patternDescription", skip_serializing_if = "Option::is_none")]
    pub pattern_description: Option<String>,
    /// 数値入力の下限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

// ---------------------------------------------------------------------------
// POST リクエスト / レスポンス
// ---------------------------------------------------------------------------

/// アクションPOSTリクエストのボディ。
/// `account`は手数料支払者となる呼び出し側の公開鍵（Base58）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPostRequest {
    pub account: String,
}

/// アクションPOSTレスポンス。部分署名済みトランザクションを返す。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionTransactionResponse {
    /// レスポンス種別。常に`"transaction"`。
    #[serde(rename = "type")]
    pub kind: String,
    /// Base64エンコードされたシリアライズ済みトランザクション
    pub transaction: String,
    /// ウォレットに表示される補足メッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// エラーレスポンスのエンベロープ。4xx/5xx共通。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionError {
    pub message: String,
}

// ---------------------------------------------------------------------------
// 検証済みリクエスト
// ---------------------------------------------------------------------------

/// NFT作成リクエスト。ルート層で形状検証済み。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssetRequest {
    /// NFT名（4〜50英数字）。署名鍵のルックアップキーを兼ねる。
    pub name: String,
    /// 画像URL
    pub url: String,
    /// 手数料支払者の公開鍵（Base58）
    pub account: String,
}

/// コレクション作成リクエスト。ルート層で形状検証済み。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    /// コレクション名（4〜10英数字）。署名鍵のルックアップキーを兼ねる。
    pub name: String,
    /// 画像URL
    pub url: String,
    /// 手数料支払者の公開鍵（Base58）
    pub account: String,
    /// ミント価格（SOL）
    pub price: f64,
    /// コレクション供給量
    pub supply: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 予約語フィールドがワイヤ上で正しい名前になることを確認
    #[test]
    fn test_response_wire_format() {
        let response = ActionTransactionResponse {
            kind: "transaction".to_string(),
            transaction: "AAAA".to_string(),
            message: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "transaction");
        assert_eq!(json["transaction"], "AAAA");
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_parameter_wire_format() {
        let parameter = ActionParameter {
            name: "name".to_string(),
            label: "Collection name".to_string(),
            required: true,
            kind: "text".to_string(),
            pattern: Some("[a-zA-Z0-9]{4,10}".to_string()),
            pattern_description: Some("4 to 10 letters or digits".to_string()),
            min: None,
        };
        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["patternDescription"], "4 to 10 letters or digits");
        assert!(json.get("min").is_none());
    }
}
