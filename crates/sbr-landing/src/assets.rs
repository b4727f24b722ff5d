//! Asset URLs for deployments under a sub-path.

use serde::{Deserialize, Serialize};

/// Sub-path used by the GitHub Pages deployment.
pub const PAGES_BASE_PATH: &str = "/sbrv2";

/// Environment variables consulted for the base path, in order.
pub const BASE_PATH_VARS: [&str; 2] = ["SBR_BASE_PATH", "BASE_PATH"];

/// Prefixes site-relative asset paths with a deployment base path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetResolver {
    base_path: Option<String>,
}

impl AssetResolver {
    /// Resolver for `base_path`; blank values mean the site root.
    pub fn new(base_path: Option<&str>) -> Self {
        let base_path = base_path
            .map(|b| b.trim().trim_end_matches('/'))
            .filter(|b| !b.is_empty())
            .map(|b| {
                if b.starts_with('/') {
                    b.to_string()
                } else {
                    format!("/{}", b)
                }
            });
        Self { base_path }
    }

    /// Resolver from `SBR_BASE_PATH`, then `BASE_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolver from the first non-empty variable `lookup` returns.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = BASE_PATH_VARS
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty());
        Self::new(base.as_deref())
    }

    /// Detect the base path from where the page is served.
    ///
    /// Only the GitHub Pages deployment (a `github.io` host or a path under
    /// `/sbrv2`) uses a base path, and only when the first path segment is
    /// `sbrv2`.
    pub fn detect(hostname: &str, pathname: &str) -> Self {
        let on_pages = hostname.contains("github.io") || pathname.starts_with(PAGES_BASE_PATH);
        if !on_pages {
            return Self::default();
        }

        let first_segment = pathname.split('/').find(|s| !s.is_empty());
        if first_segment == Some(&PAGES_BASE_PATH[1..]) {
            Self::new(Some(PAGES_BASE_PATH))
        } else {
            Self::default()
        }
    }

    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Resolve an asset path.
    ///
    /// Absolute http(s) URLs pass through. Other paths get a leading slash
    /// and the base path, unless they already start with it.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        match &self.base_path {
            Some(base) if !has_prefix_segment(&normalized, base) => {
                format!("{}{}", base, normalized)
            }
            _ => normalized,
        }
    }
}

fn has_prefix_segment(path: &str, base: &str) -> bool {
    path == base
        || path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('/'))
}
