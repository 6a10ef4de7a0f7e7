//! # Mintr Core
//!
//! アクションAPIの中核サブシステム:
//! - 署名鍵管理（名前ごとに1つのSolanaキーペアを生成・永続化・取得）
//! - メタデータディスクリプタのオブジェクトストレージ公開
//! - mpl-coreによる「コレクション作成」「NFT作成」トランザクション構築
//! - アクションごとのオーケストレーション
//!
//! 全てのコラボレータ（鍵ストア、オブジェクトストレージ、Solana RPC）は
//! トレイトで抽象化され、コンストラクタ経由で注入される。

pub mod error;
pub mod identity;
pub mod keys;
pub mod keystore;
pub mod metadata;
pub mod rpc;
pub mod service;
pub mod solana_tx;

pub use error::CoreError;
pub use identity::Identity;
pub use keys::KeyService;
pub use service::ActionService;
