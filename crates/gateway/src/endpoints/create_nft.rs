//! # /collections/create-nft
//!
//! 1 of 1 NFTの作成アクション。GETは定義ドキュメント、POSTは
//! 部分署名済みトランザクションを返す。

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use mintr_core::ActionService;
use mintr_types::{ActionDefinition, ActionTransactionResponse, CreateAssetRequest};

use crate::config::AppState;
use crate::error::GatewayError;
use crate::validate;

#[derive(Debug, Deserialize)]
pub struct CreateNftQuery {
    name: Option<String>,
    url: Option<String>,
}

/// GET /collections/create-nft — アクション定義の配信。
pub async fn handle_definition() -> Json<ActionDefinition> {
    Json(ActionService::nft_action_definition())
}

/// POST /collections/create-nft — NFT作成。
///
/// クエリの`name`/`url`とボディの`account`を検証してからCoreを呼び出す。
pub async fn handle_create(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreateNftQuery>,
    body: String,
) -> Result<Json<ActionTransactionResponse>, GatewayError> {
    let name = validate::validate_name(query.name.as_deref(), 4, 50)?;
    let url = validate::validate_url(query.url.as_deref())?;
    let account = validate::parse_account_body(&body)?;

    let response = state
        .actions
        .create_asset(&CreateAssetRequest { name, url, account })
        .await?;

    Ok(Json(response))
}
