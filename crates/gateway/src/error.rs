//! # Gateway エラー型
//!
//! クライアントに返るのは`{message}`エンベロープのみ。内部エラーの詳細は
//! サーバー側でログに残し、レスポンスには決して含めない。

use axum::http::StatusCode;
use axum::Json;

use mintr_core::CoreError;
use mintr_types::ActionError;

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 不正なリクエスト（形状検証・重複・未登録の鍵）
    #[error("{0}")]
    BadRequest(String),
    /// 未定義のルート
    #[error("{0}")]
    RouteNotFound(String),
    /// 内部エラー。詳細はログのみに残す。
    #[error("internal server error")]
    Internal,
}

impl From<CoreError> for GatewayError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Conflict { .. } | CoreError::NotFound { .. } => {
                GatewayError::BadRequest(e.to_string())
            }
            other => {
                tracing::error!(error = %other, "アクション処理に失敗");
                GatewayError::Internal
            }
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ActionError {
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
