//! Web3 modal state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ids::{NftId, PoolId};
use crate::money::{Currency, Money};
use crate::notify::{Notification, NotificationSink};
use crate::web3::error::Web3Error;
use crate::web3::nft::{water_nfts, Nft};
use crate::web3::reserve::ReserveStats;
use crate::web3::staking::{staking_pools, StakingPool};

const NOT_CONNECTED_HINT: &str = "Please connect your wallet first";

/// Web3 modal tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Web3Tab {
    #[default]
    NftShop,
    Staking,
    Reserve,
}

impl Web3Tab {
    pub const ALL: [Web3Tab; 3] = [Web3Tab::NftShop, Web3Tab::Staking, Web3Tab::Reserve];

    pub fn as_str(&self) -> &'static str {
        match self {
            Web3Tab::NftShop => "nft-shop",
            Web3Tab::Staking => "staking",
            Web3Tab::Reserve => "reserve",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Web3Tab::NftShop => "NFT Shop",
            Web3Tab::Staking => "Staking Pools",
            Web3Tab::Reserve => "Global Reserve",
        }
    }
}

/// A demo NFT purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftPurchase {
    pub nft_id: NftId,
    pub name: String,
    pub price: Money,
}

/// A demo stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeReceipt {
    pub pool_id: PoolId,
    pub pool_name: String,
    pub amount: Money,
    pub apy_bps: i64,
    pub lock_days: u32,
}

/// State of the Web3 modal.
pub struct Web3Modal {
    tab: Web3Tab,
    connected: bool,
    selected_nft: Option<NftId>,
    selected_pool: Option<PoolId>,
    stake_input: String,
    nfts: Vec<Nft>,
    pools: Vec<StakingPool>,
    reserve: ReserveStats,
    notifier: Arc<dyn NotificationSink>,
}

impl Web3Modal {
    /// Modal with the demo collection, pools and reserve figures.
    pub fn new(notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            tab: Web3Tab::default(),
            connected: false,
            selected_nft: None,
            selected_pool: None,
            stake_input: String::new(),
            nfts: water_nfts(),
            pools: staking_pools(),
            reserve: ReserveStats::demo(),
            notifier,
        }
    }

    pub fn tab(&self) -> Web3Tab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: Web3Tab) {
        self.tab = tab;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn nfts(&self) -> &[Nft] {
        &self.nfts
    }

    pub fn pools(&self) -> &[StakingPool] {
        &self.pools
    }

    pub fn reserve(&self) -> &ReserveStats {
        &self.reserve
    }

    pub fn nft(&self, id: &NftId) -> Option<&Nft> {
        self.nfts.iter().find(|n| &n.id == id)
    }

    pub fn pool(&self, id: &PoolId) -> Option<&StakingPool> {
        self.pools.iter().find(|p| &p.id == id)
    }

    pub fn selected_nft(&self) -> Option<&NftId> {
        self.selected_nft.as_ref()
    }

    pub fn selected_pool(&self) -> Option<&PoolId> {
        self.selected_pool.as_ref()
    }

    pub fn stake_input(&self) -> &str {
        &self.stake_input
    }

    /// Connect the demo wallet. Returns false if it was already connected.
    pub fn connect_wallet(&mut self) -> bool {
        if self.connected {
            return false;
        }
        self.connected = true;
        info!("demo wallet connected");
        self.notifier.notify(Notification::success(
            "Wallet connected!",
            "Demo mode - Ready to interact with Web3 features",
        ));
        true
    }

    pub fn select_nft(&mut self, id: &NftId) -> Result<(), Web3Error> {
        if self.nft(id).is_none() {
            return Err(Web3Error::NftNotFound(id.to_string()));
        }
        self.selected_nft = Some(id.clone());
        Ok(())
    }

    /// Select a pool; clears any stake amount typed for another pool.
    pub fn select_pool(&mut self, id: &PoolId) -> Result<(), Web3Error> {
        if self.pool(id).is_none() {
            return Err(Web3Error::PoolNotFound(id.to_string()));
        }
        self.selected_pool = Some(id.clone());
        self.stake_input.clear();
        Ok(())
    }

    pub fn set_stake_input(&mut self, input: impl Into<String>) {
        self.stake_input = input.into();
    }

    /// Whether the stake control for `pool_id` is enabled.
    pub fn can_stake(&self, pool_id: &PoolId) -> bool {
        self.connected
            && self
                .pool(pool_id)
                .is_some_and(|pool| parse_stake(&self.stake_input, pool).is_ok())
    }

    /// Buy an NFT from the collection.
    pub fn buy_nft(&mut self, id: &NftId) -> Result<NftPurchase, Web3Error> {
        self.require_wallet()?;
        let nft = self
            .nft(id)
            .ok_or_else(|| Web3Error::NftNotFound(id.to_string()))?;

        let purchase = NftPurchase {
            nft_id: nft.id.clone(),
            name: nft.name.clone(),
            price: nft.price,
        };
        info!(nft = %purchase.nft_id, price = %purchase.price, "nft purchase initiated");
        self.notifier.notify(Notification::success(
            "NFT Purchase Initiated!",
            format!(
                "Purchasing {} for {} BTC",
                purchase.name,
                purchase.price.display_trimmed()
            ),
        ));
        Ok(purchase)
    }

    /// Stake `amount_input` BTC in a pool.
    ///
    /// On success the stake input and the pool selection are cleared.
    pub fn stake(&mut self, pool_id: &PoolId, amount_input: &str) -> Result<StakeReceipt, Web3Error> {
        self.require_wallet()?;
        let pool = self
            .pool(pool_id)
            .ok_or_else(|| Web3Error::PoolNotFound(pool_id.to_string()))?;

        let amount = match parse_stake(amount_input, pool) {
            Ok(amount) => amount,
            Err(e) => {
                debug!(pool = %pool_id, input = amount_input, "stake rejected");
                self.notifier.notify(Notification::error(
                    "Invalid stake amount",
                    format!("Minimum stake amount: {} BTC", pool.min_stake.display_trimmed()),
                ));
                return Err(e);
            }
        };

        let receipt = StakeReceipt {
            pool_id: pool.id.clone(),
            pool_name: pool.name.clone(),
            amount,
            apy_bps: pool.apy_bps,
            lock_days: pool.lock_days,
        };
        info!(pool = %receipt.pool_id, amount = %receipt.amount, "staking initiated");
        self.notifier.notify(Notification::success(
            "Staking Initiated!",
            format!(
                "Staking {} BTC in {} | APY: {}% | Lock: {} days",
                amount_input.trim(),
                pool.name,
                pool.apy_label(),
                pool.lock_days
            ),
        ));

        self.stake_input.clear();
        self.selected_pool = None;
        Ok(receipt)
    }

    /// Stake the typed amount in the selected pool.
    pub fn stake_selected(&mut self) -> Result<StakeReceipt, Web3Error> {
        let pool_id = self
            .selected_pool
            .clone()
            .ok_or_else(|| Web3Error::PoolNotFound("no pool selected".to_string()))?;
        let input = self.stake_input.clone();
        self.stake(&pool_id, &input)
    }

    fn require_wallet(&self) -> Result<(), Web3Error> {
        if self.connected {
            return Ok(());
        }
        self.notifier
            .notify(Notification::error("Wallet not connected", NOT_CONNECTED_HINT));
        Err(Web3Error::WalletNotConnected)
    }
}

fn parse_stake(input: &str, pool: &StakingPool) -> Result<Money, Web3Error> {
    let invalid = || Web3Error::InvalidStakeAmount {
        input: input.to_string(),
        minimum: pool.min_stake,
    };
    let amount = Money::parse(input, Currency::BTC).map_err(|_| invalid())?;
    if pool.accepts(&amount) {
        Ok(amount)
    } else {
        Err(invalid())
    }
}

impl std::fmt::Debug for Web3Modal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Web3Modal")
            .field("tab", &self.tab)
            .field("connected", &self.connected)
            .field("selected_nft", &self.selected_nft)
            .field("selected_pool", &self.selected_pool)
            .field("stake_input", &self.stake_input)
            .finish_non_exhaustive()
    }
}
