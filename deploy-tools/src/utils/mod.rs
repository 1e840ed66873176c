// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.
//!
//! None of these are specific to contract deployment, but [`deploy-tools`](crate) uses them to
//! present fees, gas and keys on the console.

use alloy::primitives::U256;
use color::Color;

pub mod color;
#[cfg(test)]
pub(crate) mod testing;

/// Pretty-prints a fee in wei as ETH.
pub fn format_fee(fee: U256) -> String {
    let Ok(gwei): Result<u64, _> = (fee / U256::from(1_000_000_000u64)).try_into() else {
        return "???".red();
    };
    let eth = gwei as f64 / 1e9;
    let text = format!("{eth:.6} ETH");
    if eth <= 0.005 {
        text.mint()
    } else if eth <= 0.05 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Pretty-prints a gas amount.
pub fn format_gas(gas: u128) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Decodes hex text, tolerating surrounding whitespace and an optional `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

/// Converts a decimal gwei amount to wei.
pub fn convert_gwei_to_wei(fee_str: &str) -> Result<u128, String> {
    let gwei = match fee_str.parse::<f64>() {
        Ok(fee) if fee >= 0.0 => fee,
        Ok(_) => return Err("fee per gas must be non-negative".to_owned()),
        Err(_) => return Err(format!("invalid fee per gas value: {fee_str}")),
    };
    if !gwei.is_finite() {
        return Err("invalid gwei value: must be finite".to_owned());
    }

    let wei = gwei * 1e9;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        return Err("result outside valid range for wei".to_owned());
    }
    Ok(wei as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_and_without_prefix() {
        assert_eq!(decode0x("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(decode0x(" 0a0b\n").unwrap(), vec![0x0a, 0x0b]);
        assert!(decode0x("0xzz").is_err());
    }

    #[test]
    fn converts_gwei() {
        assert_eq!(convert_gwei_to_wei("1").unwrap(), 1_000_000_000);
        assert_eq!(convert_gwei_to_wei("0.5").unwrap(), 500_000_000);
        assert!(convert_gwei_to_wei("-1").is_err());
        assert!(convert_gwei_to_wei("abc").is_err());
        assert!(convert_gwei_to_wei("inf").is_err());
    }

    #[test]
    fn formats_fee_in_eth() {
        let fee = U256::from(21_000u64) * U256::from(1_000_000_000u64);
        assert!(format_fee(fee).contains("0.000021 ETH"));
    }
}
