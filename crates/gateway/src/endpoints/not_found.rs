//! # フォールバックハンドラ
//!
//! 未定義のメソッド・パスへのリクエストに404を返す。

use axum::http::{Method, Uri};

use crate::error::GatewayError;

/// 未定義ルートのフォールバック。メソッドとパスを含むメッセージを返す。
pub async fn handle_not_found(method: Method, uri: Uri) -> GatewayError {
    GatewayError::RouteNotFound(format!("{} '{}' not found", method, uri.path()))
}
