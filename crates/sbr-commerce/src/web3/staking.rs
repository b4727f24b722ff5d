//! BTC staking pools.

use serde::{Deserialize, Serialize};

use crate::ids::PoolId;
use crate::money::{Currency, Money};
use crate::web3::hundredths_label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPool {
    pub id: PoolId,
    pub name: String,
    pub description: String,
    /// Annual yield in basis points (1250 = 12.5%).
    pub apy_bps: i64,
    pub min_stake: Money,
    pub total_staked: Money,
    pub lock_days: u32,
}

impl StakingPool {
    /// APY without the percent sign, e.g. "12.5" or "18".
    pub fn apy_label(&self) -> String {
        hundredths_label(self.apy_bps)
    }

    /// Whether `amount` meets the pool minimum.
    pub fn accepts(&self, amount: &Money) -> bool {
        amount.currency == self.min_stake.currency && *amount >= self.min_stake
    }
}

fn pool(
    id: &str,
    name: &str,
    description: &str,
    apy_bps: i64,
    min_stake_sats: i64,
    total_staked_sats: i64,
    lock_days: u32,
) -> StakingPool {
    StakingPool {
        id: PoolId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        apy_bps,
        min_stake: Money::new(min_stake_sats, Currency::BTC),
        total_staked: Money::new(total_staked_sats, Currency::BTC),
        lock_days,
    }
}

/// The three staking pools, shortest lock first.
pub fn staking_pools() -> Vec<StakingPool> {
    vec![
        pool(
            "pool-1",
            "Alpine Water Staking Pool",
            "Stake your Water NFTs to earn BTC rewards",
            1250,
            10_000_000,
            125_050_000_000,
            30,
        ),
        pool(
            "pool-2",
            "Premium Spring Pool",
            "Higher APY for longer lock periods",
            1800,
            50_000_000,
            85_020_000_000,
            90,
        ),
        pool(
            "pool-3",
            "Glacier Reserve Pool",
            "Maximum rewards for committed stakers",
            2500,
            100_000_000,
            210_080_000_000,
            180,
        ),
    ]
}
