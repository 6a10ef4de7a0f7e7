//! # /collections/create-one-of
//!
//! NFTコレクションの作成アクション。GETは定義ドキュメント、POSTは
//! 部分署名済みトランザクションを返す。

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use mintr_core::ActionService;
use mintr_types::{ActionDefinition, ActionTransactionResponse, CreateCollectionRequest};

use crate::config::AppState;
use crate::error::GatewayError;
use crate::validate;

#[derive(Debug, Deserialize)]
pub struct CreateOneOfQuery {
    name: Option<String>,
    url: Option<String>,
    supply: Option<String>,
    price: Option<String>,
}

/// GET /collections/create-one-of — アクション定義の配信。
pub async fn handle_definition() -> Json<ActionDefinition> {
    Json(ActionService::one_of_action_definition())
}

/// POST /collections/create-one-of — コレクション作成。
///
/// クエリの`name`/`url`/`supply`/`price`とボディの`account`を検証して
/// からCoreを呼び出す。`supply`は整数として厳密にパースする。
pub async fn handle_create(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CreateOneOfQuery>,
    body: String,
) -> Result<Json<ActionTransactionResponse>, GatewayError> {
    let name = validate::validate_name(query.name.as_deref(), 4, 10)?;
    let url = validate::validate_url(query.url.as_deref())?;
    let supply = validate::validate_supply(query.supply.as_deref())?;
    let price = validate::validate_price(query.price.as_deref())?;
    let account = validate::parse_account_body(&body)?;

    let response = state
        .actions
        .create_collection(&CreateCollectionRequest {
            name,
            url,
            account,
            price,
            supply,
        })
        .await?;

    Ok(Json(response))
}
