//! Explore the Web3 modal.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use sbr_commerce::prelude::*;
use sbr_commerce::web3::{NftPurchase, StakeReceipt};
use serde::Serialize;

use super::Web3Args;
use crate::context::Context;
use crate::output::rarity_badge;

#[derive(Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Web3Action {
    Purchase(NftPurchase),
    Stake(StakeReceipt),
    Failed { request: String, error: String },
}

#[derive(Serialize)]
struct Web3Report<'a> {
    connected: bool,
    tab: Web3Tab,
    actions: Vec<Web3Action>,
    notifications: Vec<Notification>,
    nfts: &'a [Nft],
    pools: &'a [StakingPool],
    reserve: &'a ReserveStats,
}

/// Run the web3 command.
pub async fn run(args: Web3Args, ctx: &Context) -> Result<()> {
    let stakes = args
        .stake
        .iter()
        .map(|spec| parse_stake_spec(spec))
        .collect::<Result<Vec<_>>>()?;

    let sink = Arc::new(MemorySink::new());
    let mut modal = Web3Modal::new(sink.clone());
    if let Some(tab) = args.tab {
        modal.select_tab(tab);
    }
    if args.connect {
        modal.connect_wallet();
    }

    let mut actions = Vec::new();
    for id in &args.buy {
        match modal.buy_nft(&NftId::new(id.as_str())) {
            Ok(purchase) => actions.push(Web3Action::Purchase(purchase)),
            Err(e) => actions.push(Web3Action::Failed {
                request: format!("buy {}", id),
                error: e.to_string(),
            }),
        }
    }
    for (pool, amount) in &stakes {
        match modal.stake(pool, amount) {
            Ok(receipt) => actions.push(Web3Action::Stake(receipt)),
            Err(e) => actions.push(Web3Action::Failed {
                request: format!("stake {} in {}", amount, pool),
                error: e.to_string(),
            }),
        }
    }
    let notifications = sink.drain();

    if ctx.output.is_json() {
        ctx.output.json(&Web3Report {
            connected: modal.is_connected(),
            tab: modal.tab(),
            actions,
            notifications,
            nfts: modal.nfts(),
            pools: modal.pools(),
            reserve: modal.reserve(),
        });
        return Ok(());
    }

    ctx.output.header("San Bernardino Web3");
    ctx.output.kv(
        "wallet",
        if modal.is_connected() { "connected (demo)" } else { "not connected" },
    );
    for notification in &notifications {
        ctx.output.notification(notification);
    }

    let tabs = match args.tab {
        Some(tab) => vec![tab],
        None => Web3Tab::ALL.to_vec(),
    };
    for tab in tabs {
        ctx.output.header(tab.display_name());
        match tab {
            Web3Tab::NftShop => show_nfts(&modal, ctx),
            Web3Tab::Staking => show_pools(&modal, ctx),
            Web3Tab::Reserve => {
                for (label, value) in modal.reserve().figures() {
                    ctx.output.kv(label, &value);
                }
            }
        }
    }

    Ok(())
}

fn show_nfts(modal: &Web3Modal, ctx: &Context) {
    for nft in modal.nfts() {
        let usd = nft
            .usd_estimate()
            .map(|usd| format!("≈ ${}", usd.display_amount()))
            .unwrap_or_default();
        ctx.output.list_item(&format!(
            "{} ({}) {}",
            nft.name,
            nft.id,
            rarity_badge(nft.rarity)
        ));
        ctx.output
            .kv("price", &format!("{} BTC {}", nft.price.display_trimmed(), usd));
        ctx.output.kv(
            "attributes",
            &format!(
                "purity {}%, {}, {}",
                nft.attributes.purity, nft.attributes.source, nft.attributes.vintage
            ),
        );
    }
}

fn show_pools(modal: &Web3Modal, ctx: &Context) {
    for pool in modal.pools() {
        ctx.output.list_item(&format!("{} ({})", pool.name, pool.id));
        ctx.output.kv("APY", &format!("{}%", pool.apy_label()));
        ctx.output
            .kv("min stake", &format!("{} BTC", pool.min_stake.display_trimmed()));
        ctx.output.kv(
            "total staked",
            &format!("{} BTC", pool.total_staked.display_trimmed()),
        );
        ctx.output.kv("lock", &format!("{} days", pool.lock_days));
    }
}

/// Parse `pool-id:amount`.
fn parse_stake_spec(spec: &str) -> Result<(PoolId, String)> {
    let (pool, amount) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid stake '{}': expected pool-id:amount", spec))?;
    if pool.is_empty() {
        return Err(anyhow!("Invalid stake '{}': missing pool id", spec));
    }
    Ok((PoolId::new(pool), amount.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stake_spec() {
        let (pool, amount) = parse_stake_spec("pool-2:0.75").unwrap();
        assert_eq!(pool, PoolId::new("pool-2"));
        assert_eq!(amount, "0.75");
        assert!(parse_stake_spec("pool-2").is_err());
        assert!(parse_stake_spec(":1").is_err());
    }

    #[test]
    fn test_failed_action_json() {
        let action = Web3Action::Failed {
            request: "buy nft-1".to_string(),
            error: "Wallet not connected".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["action"], "failed");
        assert_eq!(value["error"], "Wallet not connected");
    }
}
