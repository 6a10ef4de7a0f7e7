//! # Identity
//!
//! 名前に束縛された署名用Solanaキーペア。ミント／更新権限として使用する。
//! 秘密鍵は外部レスポンスに含まれず、ログにも出力されない。

use chrono::{DateTime, Utc};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;

/// 名前ごとに一意な署名用アイデンティティ。
///
/// 作成後は読み取り専用。更新・削除の経路は存在しない。
pub struct Identity {
    /// 呼び出し側が選択した一意な名前（主キー）
    pub name: String,
    /// 署名用キーペア。秘密鍵はこの構造体の外に出さない。
    keypair: Keypair,
    /// 作成時刻
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(name: String, keypair: Keypair, created_at: DateTime<Utc>) -> Self {
        Self {
            name,
            keypair,
            created_at,
        }
    }

    /// 公開鍵。
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Base58エンコードされた公開鍵。
    pub fn public_key(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    /// トランザクション署名用のキーペア参照。
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// 永続化用の秘密鍵バイト列（64バイト）。
    pub fn secret_bytes(&self) -> [u8; 64] {
        self.keypair.to_bytes()
    }
}

// 秘密鍵を含むためDebugは手書き。公開側のフィールドのみ出力する。
impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("name", &self.name)
            .field("public_key", &self.public_key())
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Debug出力に秘密鍵が混入しないことを確認
    #[test]
    fn test_debug_hides_secret() {
        let keypair = Keypair::new();
        let secret_b58 = keypair.to_base58_string();
        let identity = Identity::new("Rocket".to_string(), keypair, Utc::now());

        let rendered = format!("{identity:?}");
        assert!(rendered.contains("Rocket"));
        assert!(rendered.contains(&identity.public_key()));
        assert!(!rendered.contains(&secret_b58));
    }
}
