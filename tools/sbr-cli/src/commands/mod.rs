//! CLI command implementations.

pub mod bubbles;
pub mod catalog;
pub mod config;
pub mod sections;
pub mod shop;
pub mod web3;

use clap::{Args, Subcommand};
use sbr_commerce::prelude::{EventCategory, PurchaseCategory, Web3Tab};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Only list one purchase category (private, business, events).
    #[arg(short = 't', long, value_parser = parse_category)]
    pub category: Option<PurchaseCategory>,

    /// Only list event packages of this type (work, cultural, party).
    #[arg(long, value_parser = parse_event_type)]
    pub event_type: Option<EventCategory>,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Shop script: one action per line (see `shop --help`).
    #[arg(short, long, conflicts_with = "add")]
    pub script: Option<String>,

    /// Purchase category for `--add`.
    #[arg(short = 't', long, value_parser = parse_category, default_value = "private")]
    pub category: PurchaseCategory,

    /// Item to add: `product:size[:qty]` for waters, `product[:qty]` otherwise.
    #[arg(short, long)]
    pub add: Vec<String>,

    /// Fill the cart without checking out.
    #[arg(long)]
    pub no_checkout: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the web3 command.
#[derive(Args)]
pub struct Web3Args {
    /// Only show one tab (nft-shop, staking, reserve).
    #[arg(long, value_parser = parse_tab)]
    pub tab: Option<Web3Tab>,

    /// Connect the demo wallet first.
    #[arg(long)]
    pub connect: bool,

    /// Buy an NFT by id.
    #[arg(long)]
    pub buy: Vec<String>,

    /// Stake in a pool: `pool-id:amount`.
    #[arg(long)]
    pub stake: Vec<String>,
}

/// Arguments for the bubbles command.
#[derive(Args)]
pub struct BubblesArgs {
    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exact number of bubbles, overriding the configured range.
    #[arg(long)]
    pub count: Option<u32>,

    /// Print inline CSS instead of a table.
    #[arg(long)]
    pub css: bool,
}

/// Arguments for the sections command.
#[derive(Args)]
pub struct SectionsArgs {
    /// Section to compute a scroll target for.
    #[arg(long)]
    pub goto: Option<String>,

    /// Viewport-relative top of the section, in pixels.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub element_top: f64,

    /// Current vertical scroll, in pixels.
    #[arg(long, default_value = "0")]
    pub scroll_y: f64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

fn parse_category(s: &str) -> Result<PurchaseCategory, String> {
    s.parse::<PurchaseCategory>().map_err(|_| {
        format!(
            "unknown purchase category '{}' (expected private, business or events)",
            s
        )
    })
}

fn parse_event_type(s: &str) -> Result<EventCategory, String> {
    s.parse::<EventCategory>()
        .map_err(|_| format!("unknown event type '{}' (expected work, cultural or party)", s))
}

fn parse_tab(s: &str) -> Result<Web3Tab, String> {
    Web3Tab::ALL
        .into_iter()
        .find(|tab| tab.as_str() == s)
        .ok_or_else(|| format!("unknown tab '{}' (expected nft-shop, staking or reserve)", s))
}
