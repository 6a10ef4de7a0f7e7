//! # Core エラー型
//!
//! コラボレータの失敗種別ごとに1バリアント。呼び出し側は種別ごとに
//! 明示的にハンドリングする。

/// Coreエラー型。
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 指定名の鍵が既に存在する（条件付き書き込みの競合）
    #[error("key for name {name} already exists")]
    Conflict { name: String },
    /// 指定名の鍵が見つからない
    #[error("could not find key for name {name}")]
    NotFound { name: String },
    /// 鍵ストア・オブジェクトストレージのI/O失敗
    #[error("storage error: {0}")]
    Storage(String),
    /// Solana RPC エラー
    #[error("solana rpc error: {0}")]
    Rpc(String),
    /// 内部エラー（命令組み立て・シリアライズ等）
    #[error("internal error: {0}")]
    Internal(String),
}
