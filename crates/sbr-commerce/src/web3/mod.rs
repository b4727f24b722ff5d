//! Web3 promotional modal: water NFTs, BTC staking pools and the reserve
//! dashboard. Demo data only; nothing touches a chain or a wallet.

mod error;
mod modal;
mod nft;
mod reserve;
mod staking;

pub use error::Web3Error;
pub use modal::{NftPurchase, StakeReceipt, Web3Modal, Web3Tab};
pub use nft::{water_nfts, Nft, NftAttributes, Rarity, BTC_USD_RATE};
pub use reserve::ReserveStats;
pub use staking::{staking_pools, StakingPool};

/// Format a value held in hundredths, dropping trailing zeros
/// (`1250` → `"12.5"`, `1800` → `"18"`, `125` → `"1.25"`).
pub(crate) fn hundredths_label(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    match abs % 100 {
        0 => format!("{}{}", sign, abs / 100),
        frac if frac % 10 == 0 => format!("{}{}.{}", sign, abs / 100, frac / 10),
        frac => format!("{}{}.{:02}", sign, abs / 100, frac),
    }
}

/// Insert thousands separators into the integer part of a decimal string.
pub(crate) fn group_thousands(amount: &str) -> String {
    let (sign, rest) = match amount.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", amount),
    };
    let (whole, frac) = match rest.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hundredths_label() {
        assert_eq!(hundredths_label(1250), "12.5");
        assert_eq!(hundredths_label(1800), "18");
        assert_eq!(hundredths_label(125), "1.25");
        assert_eq!(hundredths_label(1820), "18.2");
        assert_eq!(hundredths_label(-5), "-0.05");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("2847.32"), "2,847.32");
        assert_eq!(group_thousands("185075800"), "185,075,800");
        assert_eq!(group_thousands("1247"), "1,247");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("-1000.5"), "-1,000.5");
    }
}
