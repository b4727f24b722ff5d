//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use sbr_commerce::Currency;
use sbr_landing::LandingConfig;
use sbr_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["sbr.toml", ".sbr.toml", "sbr.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Shop and checkout configuration.
    #[serde(default)]
    pub shop: ShopConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Landing page configuration.
    #[serde(default)]
    pub landing: LandingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Shop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Cart currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Payment-session endpoint. Unset means no payment provider is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_endpoint: Option<String>,

    /// Hosted checkout page; session ids are appended to it.
    #[serde(default = "default_hosted_checkout_url")]
    pub hosted_checkout_url: String,

    /// Catalog file (JSON or TOML) replacing the builtin catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

fn default_currency() -> String {
    "CHF".to_string()
}

fn default_hosted_checkout_url() -> String {
    "https://checkout.stripe.com/pay".to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            checkout_endpoint: None,
            hosted_checkout_url: default_hosted_checkout_url(),
            catalog: None,
        }
    }
}

impl ShopConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unknown currency: {}", self.currency))
    }
}

/// Generate a default sbr.toml config file.
pub fn generate_default_config() -> String {
    r#"# San Bernardino storefront configuration

[shop]
currency = "CHF"
# Payment-session endpoint; leave unset to simulate every checkout.
# checkout_endpoint = "http://localhost:3000/api/create-checkout-session"
hosted_checkout_url = "https://checkout.stripe.com/pay"
# catalog = "catalog.json"

[logging]
level = "info"
format = "human"
suppress_patterns = ["inject.js", "same-runtime"]

[landing]
# base_path = "/sbrv2"

[landing.bubbles]
min_count = 20
max_count = 60
min_size_px = 3
max_size_px = 12
max_delay_s = 15
min_duration_s = 3
max_duration_s = 8
max_blur_px = 2
"#
    .to_string()
}
