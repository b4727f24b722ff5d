use thiserror::Error;

use crate::money::Money;

/// Errors from Web3 modal actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Web3Error {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("NFT not found: {0}")]
    NftNotFound(String),

    #[error("Staking pool not found: {0}")]
    PoolNotFound(String),

    /// Missing, unparseable, or below the pool minimum.
    #[error("Invalid stake amount {input:?}: minimum is {} BTC", minimum.display_trimmed())]
    InvalidStakeAmount { input: String, minimum: Money },
}
