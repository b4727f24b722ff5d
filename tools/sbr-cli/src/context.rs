//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use sbr_commerce::prelude::*;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the config file, or the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            return path;
        }
        match self.config_path.as_deref().and_then(Path::parent) {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(path),
            _ => self.cwd.join(path),
        }
    }

    /// The configured catalog, or the builtin one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.shop.catalog {
            Some(path) => {
                let path = self.resolve_path(path);
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Ok(Catalog::builtin()),
        }
    }

    /// Payment-session provider for the configured endpoint.
    pub fn payment_sessions(&self) -> Arc<dyn PaymentSessionProvider> {
        match &self.config.shop.checkout_endpoint {
            Some(endpoint) => Arc::new(HttpPaymentSessions::new(endpoint.clone())),
            None => Arc::new(UnconfiguredPaymentSessions::new()),
        }
    }

    /// A shop modal wired to the configured collaborators.
    pub fn shop_modal(
        &self,
        redirect: Arc<LinkRedirect>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<ShopModal> {
        let currency = self.config.shop.currency()?;
        Ok(
            ShopModal::new(self.catalog()?, self.payment_sessions(), redirect, sink)
                .with_currency(currency),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config_path: Option<PathBuf>, config: CliConfig) -> Context {
        Context {
            config,
            config_path,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_in_parent() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let mut config = CliConfig::default();
        config.shop.currency = "EUR".to_string();
        config
            .save(root.path().join("sbr.toml").to_str().unwrap())
            .unwrap();

        let (found, path) = Context::find_config(&nested).unwrap();
        assert_eq!(found.shop.currency, "EUR");
        assert_eq!(path, root.path().join("sbr.toml"));
    }

    #[test]
    fn test_catalog_relative_to_config() {
        let root = tempfile::tempdir().unwrap();
        let catalog_path = root.path().join("catalog.json");
        let mut catalog = Catalog::builtin();
        catalog.events.clear();
        std::fs::write(&catalog_path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let mut config = CliConfig::default();
        config.shop.catalog = Some("catalog.json".to_string());
        let ctx = context_in(
            Path::new("/"),
            Some(root.path().join("sbr.toml")),
            config,
        );

        let loaded = ctx.catalog().unwrap();
        assert!(loaded.events.is_empty());
        assert_eq!(loaded.private.len(), 3);
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.shop.catalog = Some("missing.toml".to_string());
        let ctx = context_in(root.path(), None, config);
        assert!(ctx.catalog().is_err());
    }

    #[tokio::test]
    async fn test_unconfigured_checkout_is_simulated() {
        let root = tempfile::tempdir().unwrap();
        let ctx = context_in(root.path(), None, CliConfig::default());
        let sink = Arc::new(MemorySink::new());
        let redirect = Arc::new(LinkRedirect::new(&ctx.config.shop.hosted_checkout_url));

        let modal = ctx.shop_modal(redirect, sink.clone()).unwrap();
        modal.open();
        modal.switch_category(PurchaseCategory::Event).unwrap();
        modal.add_product("work-event-basic").unwrap();

        assert!(modal.checkout().await.is_simulated());
        assert_eq!(sink.last().unwrap().title, "Checkout initiated!");
    }
}
