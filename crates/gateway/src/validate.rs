//! # リクエスト形状検証
//!
//! Coreを呼び出す前に行うフィールド単位の検証。検証失敗は
//! クライアントエラー（400）としてその場で返し、Coreには到達させない。

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::error::GatewayError;

/// 名前の検証。英数字のみ、長さは`[min_len, max_len]`。
pub fn validate_name(
    name: Option<&str>,
    min_len: usize,
    max_len: usize,
) -> Result<String, GatewayError> {
    match name {
        Some(name)
            if name.len() >= min_len
                && name.len() <= max_len
                && name.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            Ok(name.to_string())
        }
        _ => Err(GatewayError::BadRequest(
            "name is missing or invalid".to_string(),
        )),
    }
}

/// 画像URLの検証。最低5文字。
pub fn validate_url(url: Option<&str>) -> Result<String, GatewayError> {
    match url {
        Some(url) if url.len() >= 5 => Ok(url.to_string()),
        _ => Err(GatewayError::BadRequest(
            "url is missing or invalid".to_string(),
        )),
    }
}

/// 供給量の検証。正の整数を文字列から厳密にパースする。
/// `"10.5"`のような小数は暗黙に丸めず拒否する。
pub fn validate_supply(supply: Option<&str>) -> Result<u32, GatewayError> {
    match supply.and_then(|raw| raw.parse::<u32>().ok()) {
        Some(supply) if supply >= 1 => Ok(supply),
        _ => Err(GatewayError::BadRequest(
            "supply is missing or invalid".to_string(),
        )),
    }
}

/// ミント価格の検証。非負の有限数。
pub fn validate_price(price: Option<&str>) -> Result<f64, GatewayError> {
    match price.and_then(|raw| raw.parse::<f64>().ok()) {
        Some(price) if price >= 0.0 && price.is_finite() => Ok(price),
        _ => Err(GatewayError::BadRequest(
            "price is missing or invalid".to_string(),
        )),
    }
}

/// リクエストボディから手数料支払者のアカウントを取り出す。
/// `{"account": "<base58公開鍵>"}`の形でなければ400。
pub fn parse_account_body(body: &str) -> Result<String, GatewayError> {
    if body.is_empty() {
        return Err(GatewayError::BadRequest("body is missing".to_string()));
    }

    let parsed: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| GatewayError::BadRequest("body is invalid".to_string()))?;

    let account = parsed
        .get("account")
        .and_then(|v| v.as_str())
        .ok_or_else(|| GatewayError::BadRequest("account is missing".to_string()))?;

    if Pubkey::from_str(account).is_err() {
        return Err(GatewayError::BadRequest("account is invalid".to_string()));
    }

    Ok(account.to_string())
}
