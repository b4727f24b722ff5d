//! Water NFT collection.

use serde::{Deserialize, Serialize};

use crate::ids::NftId;
use crate::money::{Currency, Money};

/// Fixed USD price of one BTC used for display estimates.
pub const BTC_USD_RATE: i64 = 65_000;

/// NFT rarity tier, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// Upper-case badge text.
    pub fn badge(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttributes {
    /// Purity percentage, e.g. 99.9.
    pub purity: f64,
    pub source: String,
    pub vintage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
    pub id: NftId,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Price in BTC.
    pub price: Money,
    pub rarity: Rarity,
    pub attributes: NftAttributes,
}

impl Nft {
    /// USD estimate of the price at [`BTC_USD_RATE`].
    pub fn usd_estimate(&self) -> Option<Money> {
        // satoshis * rate * cents / satoshis-per-btc
        let cents = i128::from(self.price.minor_units) * i128::from(BTC_USD_RATE) * 100
            / i128::from(Currency::BTC.minor_per_unit());
        i64::try_from(cents)
            .ok()
            .map(|cents| Money::new(cents, Currency::USD))
    }
}

#[allow(clippy::too_many_arguments)]
fn nft(
    id: &str,
    name: &str,
    description: &str,
    image: &str,
    satoshis: i64,
    rarity: Rarity,
    purity: f64,
    source: &str,
) -> Nft {
    Nft {
        id: NftId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        price: Money::new(satoshis, Currency::BTC),
        rarity,
        attributes: NftAttributes {
            purity,
            source: source.to_string(),
            vintage: "2024".to_string(),
        },
    }
}

/// The six water NFTs offered in the shop tab.
pub fn water_nfts() -> Vec<Nft> {
    vec![
        nft(
            "nft-1",
            "Alpine Spring #001",
            "First edition Pure Spring NFT from the source",
            "https://ext.same-assets.com/1656755911/4227031535.jpeg",
            50_000_000,
            Rarity::Legendary,
            99.9,
            "Alpine Spring",
        ),
        nft(
            "nft-2",
            "Sparkling Crest #042",
            "Rare Sparkling Crest collection piece",
            "https://ext.same-assets.com/1656755911/971678446.jpeg",
            30_000_000,
            Rarity::Epic,
            99.7,
            "Mountain Source",
        ),
        nft(
            "nft-3",
            "Alpine Burst #128",
            "Epic Alpine Burst water NFT",
            "https://ext.same-assets.com/1656755911/1577364574.jpeg",
            20_000_000,
            Rarity::Rare,
            99.5,
            "Glacier Spring",
        ),
        nft(
            "nft-4",
            "Pure Spring #256",
            "Common Pure Spring NFT",
            "https://ext.same-assets.com/1656755911/4227031535.jpeg",
            10_000_000,
            Rarity::Common,
            99.0,
            "Alpine Spring",
        ),
        nft(
            "nft-5",
            "Mountain Source #512",
            "Rare mountain source collection",
            "https://ext.same-assets.com/1656755911/515093026.jpeg",
            25_000_000,
            Rarity::Rare,
            99.6,
            "Mountain Peak",
        ),
        nft(
            "nft-6",
            "Glacier Pure #1024",
            "Epic glacier water NFT",
            "https://ext.same-assets.com/1656755911/3649516832.jpeg",
            35_000_000,
            Rarity::Epic,
            99.8,
            "Glacier",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection() {
        let nfts = water_nfts();
        assert_eq!(nfts.len(), 6);
        assert_eq!(nfts[0].price.display_trimmed(), "0.5");
        assert_eq!(nfts[0].rarity.badge(), "LEGENDARY");
        assert!(nfts.iter().all(|n| n.price.currency == Currency::BTC));
    }

    #[test]
    fn test_usd_estimate() {
        let nfts = water_nfts();
        assert_eq!(nfts[0].usd_estimate(), Some(Money::new(3_250_000, Currency::USD)));
        assert_eq!(nfts[4].usd_estimate().unwrap().display_amount(), "16250.00");
    }

    #[test]
    fn test_rarity_order() {
        assert!(Rarity::Legendary > Rarity::Epic);
        assert!(Rarity::Rare > Rarity::Common);
        assert_eq!(serde_json::to_string(&Rarity::Epic).unwrap(), "\"epic\"");
    }
}
