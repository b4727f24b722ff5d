//! Landing page helpers for San Bernardino Alpine Waters.
//!
//! Everything here is declarative: the view layer renders what these
//! types describe.
//!
//! - **Bubbles**: Randomised background particle descriptors
//! - **Assets**: Base-path aware asset URLs for sub-path deployments
//! - **Navigation**: Page sections, scroll targets and the header state

pub mod assets;
pub mod bubbles;
pub mod error;
pub mod navigation;

use serde::{Deserialize, Serialize};

pub use assets::AssetResolver;
pub use bubbles::{Bubble, BubbleField, BubbleSettings};
pub use error::LandingError;
pub use navigation::{header_is_scrolled, scroll_target, Section};

/// The `[landing]` configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Deployment sub-path, e.g. `/sbrv2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub bubbles: BubbleSettings,
}

impl LandingConfig {
    /// Asset resolver from the configured base path, falling back to the environment.
    pub fn asset_resolver(&self) -> AssetResolver {
        match &self.base_path {
            Some(base) => AssetResolver::new(Some(base)),
            None => AssetResolver::from_env(),
        }
    }
}
