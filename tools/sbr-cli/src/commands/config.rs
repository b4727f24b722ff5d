//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let shop = &ctx.config.shop;
    ctx.output.info("");
    ctx.output.info("[shop]");
    ctx.output.kv("currency", &shop.currency);
    ctx.output.kv(
        "checkout_endpoint",
        shop.checkout_endpoint.as_deref().unwrap_or("(none, checkout is simulated)"),
    );
    ctx.output.kv("hosted_checkout_url", &shop.hosted_checkout_url);
    ctx.output
        .kv("catalog", shop.catalog.as_deref().unwrap_or("(builtin)"));

    let logging = &ctx.config.logging;
    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", logging.level.as_str());
    ctx.output.kv("format", &format!("{:?}", logging.format).to_lowercase());
    ctx.output.kv(
        "suppress_patterns",
        &logging.suppress.suppress_patterns.join(", "),
    );

    let landing = &ctx.config.landing;
    let bubbles = &landing.bubbles;
    ctx.output.info("");
    ctx.output.info("[landing]");
    ctx.output.kv(
        "base_path",
        landing.asset_resolver().base_path().unwrap_or("(none)"),
    );
    ctx.output.kv(
        "bubbles",
        &format!(
            "{}-{} bubbles, {}-{}px, {}-{}s",
            bubbles.min_count,
            bubbles.max_count,
            bubbles.min_size_px,
            bubbles.max_size_px,
            bubbles.min_duration_s,
            bubbles.max_duration_s
        ),
    );

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("sbr.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    ctx.output
        .success(&format!("Created {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect configuration errors and warnings.
fn check_config(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();
    let shop = &ctx.config.shop;

    if let Err(e) = shop.currency() {
        errors.push(format!("shop.currency: {}", e));
    }

    match &shop.checkout_endpoint {
        Some(endpoint) if !is_http_url(endpoint) => {
            errors.push(format!(
                "shop.checkout_endpoint '{}' must be an http(s) URL",
                endpoint
            ));
        }
        Some(_) => {}
        None => warnings.push(
            "shop.checkout_endpoint is not set; every checkout will be simulated".to_string(),
        ),
    }

    if !is_http_url(&shop.hosted_checkout_url) {
        errors.push(format!(
            "shop.hosted_checkout_url '{}' must be an http(s) URL",
            shop.hosted_checkout_url
        ));
    }

    if let Err(e) = ctx.catalog() {
        errors.push(format!("shop.catalog: {:#}", e));
    }

    if let Err(e) = ctx.config.landing.bubbles.validate() {
        errors.push(format!("landing.bubbles: {}", e));
    }

    if let Some(base_path) = &ctx.config.landing.base_path {
        if !base_path.is_empty() && !base_path.starts_with('/') {
            warnings.push(format!(
                "landing.base_path '{}' should start with '/'",
                base_path
            ));
        }
    }

    let patterns = &ctx.config.logging.suppress.suppress_patterns;
    if patterns.iter().any(|p| p.trim().is_empty()) {
        warnings.push("logging.suppress_patterns contains empty patterns; they are ignored".to_string());
    }

    (errors, warnings)
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
