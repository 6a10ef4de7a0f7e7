//! # Solanaトランザクション構築ヘルパー
//!
//! mpl-coreの「コレクション作成」「アセット作成」トランザクションを
//! 構築する。mpl-coreクレートのビルダーを使用する。
//!
//! いずれのトランザクションも手数料支払者スロットには呼び出し側の
//! 公開鍵を未署名のまま載せる。サービスが呼び出し側の秘密鍵を保持・
//! 要求することは決してない。

use mpl_core::instructions::{CreateCollectionV2Builder, CreateV2Builder};
use mpl_core::types::{MasterEdition, Plugin, PluginAuthority, PluginAuthorityPair};
use solana_sdk::{
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// コレクション作成トランザクション構築
// ---------------------------------------------------------------------------

/// mpl-core CreateCollectionV2 トランザクションを構築する。
///
/// アイデンティティのキーペアがコレクションアカウント本体であり、
/// 更新権限も兼ねる。供給量はMasterEditionプラグインのmax_supplyとして
/// オンチェーンに載せる。
///
/// 署名者: payer (fee payer), collection (新規アカウント)
/// サービスはcollection鍵でのみ部分署名する。payerは後から署名を追加する。
pub fn build_create_collection_tx(
    collection: &Keypair,
    payer: &Pubkey,
    name: &str,
    uri: &str,
    supply: u32,
    blockhash: &Hash,
) -> Result<Transaction, CoreError> {
    let master_edition = PluginAuthorityPair {
        plugin: Plugin::MasterEdition(MasterEdition {
            max_supply: Some(supply),
            name: None,
            uri: None,
        }),
        authority: Some(PluginAuthority::UpdateAuthority),
    };

    let create_collection_ix = CreateCollectionV2Builder::new()
        .collection(collection.pubkey())
        .update_authority(Some(collection.pubkey()))
        .payer(*payer)
        .name(name.to_string())
        .uri(uri.to_string())
        .plugins(vec![master_edition])
        .instruction();

    let message = Message::new_with_blockhash(&[create_collection_ix], Some(payer), blockhash);
    let mut tx = Transaction::new_unsigned(message);

    // コレクション鍵のみで部分署名する。呼び出し側の署名は下流で追加される。
    tx.try_partial_sign(&[collection], *blockhash)
        .map_err(|e| CoreError::Internal(format!("コレクション署名の適用に失敗: {e}")))?;

    Ok(tx)
}

// ---------------------------------------------------------------------------
// アセット作成トランザクション構築
// ---------------------------------------------------------------------------

/// mpl-core CreateV2 トランザクションを構築する。
///
/// アイデンティティのキーペアがアセットアカウント本体であり、更新権限も
/// 兼ねる。所有者は呼び出し側。`uri`にはMetadata Publisherが返した
/// ディスクリプタURLをそのまま渡すこと。
///
/// 署名者: payer (fee payer), asset (新規アカウント)
/// アセット作成はミント権限の署名だけで完結するため、サービスが保持する
/// 全ての署名者スロットに署名を適用して返す。payerの署名のみ未了で残る。
pub fn build_create_asset_tx(
    asset: &Keypair,
    payer: &Pubkey,
    name: &str,
    uri: &str,
    blockhash: &Hash,
) -> Result<Transaction, CoreError> {
    let create_ix = CreateV2Builder::new()
        .asset(asset.pubkey())
        .payer(*payer)
        .owner(Some(*payer))
        .update_authority(Some(asset.pubkey()))
        .name(name.to_string())
        .uri(uri.to_string())
        .instruction();

    let message = Message::new_with_blockhash(&[create_ix], Some(payer), blockhash);
    let mut tx = Transaction::new_unsigned(message);

    let message_bytes = tx.message.serialize();
    let signature = asset.sign_message(&message_bytes);
    apply_partial_signature(&mut tx, &asset.pubkey(), signature)?;

    Ok(tx)
}

// ---------------------------------------------------------------------------
// 部分署名ヘルパー
// ---------------------------------------------------------------------------

/// トランザクションに部分署名を適用する。
/// 指定した公開鍵に対応する署名スロットに署名をセットする。
pub fn apply_partial_signature(
    tx: &mut Transaction,
    pubkey: &Pubkey,
    signature: Signature,
) -> Result<(), CoreError> {
    let num_signers = tx.message.header.num_required_signatures as usize;
    for (i, key) in tx.message.account_keys.iter().take(num_signers).enumerate() {
        if key == pubkey {
            tx.signatures[i] = signature;
            return Ok(());
        }
    }

    Err(CoreError::Internal(format!(
        "公開鍵 {pubkey} がトランザクションの署名者に見つかりません"
    )))
}

/// トランザクションをバイナリにシリアライズする。
pub fn serialize_transaction(tx: &Transaction) -> Result<Vec<u8>, CoreError> {
    bincode::serialize(tx)
        .map_err(|e| CoreError::Internal(format!("トランザクションのシリアライズに失敗: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_create_collection_tx() {
        let collection = Keypair::new();
        let payer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();

        let tx = build_create_collection_tx(
            &collection,
            &payer,
            "Rockets",
            "https://img/rockets.png",
            10,
            &blockhash,
        )
        .unwrap();

        // 2つの署名者（payer, collection）、1つの命令
        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert_eq!(tx.message.instructions.len(), 1);

        // payerが先頭アカウントで、そのスロットは未署名のまま
        assert_eq!(tx.message.account_keys[0], payer);
        assert_eq!(tx.signatures[0], Signature::default());

        // collectionスロットには検証可能な署名が入っている
        let message_bytes = tx.message.serialize();
        let collection_index = tx
            .message
            .account_keys
            .iter()
            .position(|k| *k == collection.pubkey())
            .unwrap();
        assert!(tx.signatures[collection_index]
            .verify(collection.pubkey().as_ref(), &message_bytes));
    }

    #[test]
    fn test_build_create_asset_tx() {
        let asset = Keypair::new();
        let payer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();

        let tx = build_create_asset_tx(
            &asset,
            &payer,
            "Rocket",
            "https://assets.example/a/Rocket.json",
            &blockhash,
        )
        .unwrap();

        // 2つの署名者（payer, asset）、1つの命令
        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert_eq!(tx.message.instructions.len(), 1);

        // payerのみ未署名で残る
        assert_eq!(tx.signatures[0], Signature::default());
        let message_bytes = tx.message.serialize();
        let asset_index = tx
            .message
            .account_keys
            .iter()
            .position(|k| *k == asset.pubkey())
            .unwrap();
        assert!(tx.signatures[asset_index].verify(asset.pubkey().as_ref(), &message_bytes));
    }

    /// ディスクリプタURLが命令データにそのまま埋め込まれること
    #[test]
    fn test_asset_tx_embeds_uri() {
        let asset = Keypair::new();
        let payer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();
        let uri = "https://assets.example/acc/2026/8/7/Rocket.json";

        let tx = build_create_asset_tx(&asset, &payer, "Rocket", uri, &blockhash).unwrap();

        let data = &tx.message.instructions[0].data;
        let uri_bytes = uri.as_bytes();
        assert!(data.windows(uri_bytes.len()).any(|w| w == uri_bytes));
    }

    #[test]
    fn test_apply_partial_signature() {
        let collection = Keypair::new();
        let payer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();

        let mut tx = build_create_collection_tx(
            &collection,
            &payer,
            "Rockets",
            "https://img/rockets.png",
            1,
            &blockhash,
        )
        .unwrap();

        // payerスロットへの署名適用は成功する
        let dummy_sig = Signature::from([1u8; 64]);
        assert!(apply_partial_signature(&mut tx, &payer, dummy_sig).is_ok());
        assert_eq!(tx.signatures[0], dummy_sig);

        // 署名者に存在しない公開鍵では失敗する
        let unknown = Pubkey::new_unique();
        assert!(apply_partial_signature(&mut tx, &unknown, dummy_sig).is_err());
    }

    #[test]
    fn test_serialize_transaction() {
        let collection = Keypair::new();
        let payer = Pubkey::new_unique();
        let blockhash = Hash::new_unique();

        let tx = build_create_collection_tx(
            &collection,
            &payer,
            "Rockets",
            "https://img/rockets.png",
            10,
            &blockhash,
        )
        .unwrap();

        let bytes = serialize_transaction(&tx).unwrap();
        assert!(!bytes.is_empty());
    }
}
