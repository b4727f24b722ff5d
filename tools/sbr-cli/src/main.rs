//! sbr - Command line demo for the San Bernardino Alpine Waters storefront.
//!
//! Commands:
//! - `sbr catalog` - List products by purchase category
//! - `sbr shop` - Run a scripted shop session and check out
//! - `sbr web3` - Explore the Web3 modal (NFTs, staking, reserve)
//! - `sbr bubbles` - Generate background bubble descriptors
//! - `sbr sections` - List landing page sections
//! - `sbr config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use sbr_observability::LogLevel;

use commands::{BubblesArgs, CatalogArgs, ConfigArgs, SectionsArgs, ShopArgs, Web3Args};

/// San Bernardino Alpine Waters - storefront demo
#[derive(Parser)]
#[command(name = "sbr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Catalog(CatalogArgs),

    /// Run a shop session: fill a cart and check out
    Shop(ShopArgs),

    /// Explore the Web3 modal
    Web3(Web3Args),

    /// Generate background bubbles
    Bubbles(BubblesArgs),

    /// List landing page sections
    Sections(SectionsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.verbose && logging.level > LogLevel::Debug {
        logging.level = LogLevel::Debug;
    }
    sbr_observability::init_tracing(&logging).context("Failed to initialise logging")?;
    tracing::debug!(config = ?ctx.config_path, cwd = %ctx.cwd.display(), "context loaded");

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Web3(args) => commands::web3::run(args, &ctx).await,
        Commands::Bubbles(args) => commands::bubbles::run(args, &ctx).await,
        Commands::Sections(args) => commands::sections::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
