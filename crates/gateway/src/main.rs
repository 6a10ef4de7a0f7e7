//! # Mintr Action API Gateway
//!
//! Solana Actionsプロトコルに準拠したHTTP APIサーバー。
//!
//! ## 役割
//! - リクエスト形状の検証（名前・URL・数値・アカウント）
//! - Coreアクションサービスへのディスパッチ
//! - `{message}`エンベロープへのエラー変換
//! - CORS（ウォレットクライアントからのクロスオリジンアクセス）
//!
//! ## API エンドポイント
//! - `GET  /collections/create-nft` — NFT作成アクションの定義
//! - `POST /collections/create-nft` — NFT作成トランザクション構築
//! - `GET  /collections/create-one-of` — コレクション作成アクションの定義
//! - `POST /collections/create-one-of` — コレクション作成トランザクション構築

mod config;
mod endpoints;
mod error;
mod validate;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::AppState;

/// ルータを構築する。
pub fn router(state: Arc<AppState>) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    axum::Router::new()
        .route(
            "/collections/create-nft",
            get(endpoints::create_nft::handle_definition).post(endpoints::create_nft::handle_create),
        )
        .route(
            "/collections/create-one-of",
            get(endpoints::create_one_of::handle_definition)
                .post(endpoints::create_one_of::handle_create),
        )
        .fallback(endpoints::not_found::handle_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let state = Arc::new(config::build_state().await?);
    let app = router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    tracing::info!("Action APIを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
