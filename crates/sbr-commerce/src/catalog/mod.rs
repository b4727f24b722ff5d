//! Product catalog module.
//!
//! One catalog per purchase category: bottled waters for private
//! customers, supply products for businesses, and event packages.

mod builtin;
mod product;

pub use product::{
    BusinessKind, BusinessProduct, EventCategory, EventPackage, PrivateProduct, SizeOption,
};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cart::EventFilter;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// All products offered by the shop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub private: Vec<PrivateProduct>,
    #[serde(default)]
    pub business: Vec<BusinessProduct>,
    #[serde(default)]
    pub events: Vec<EventPackage>,
}

impl Catalog {
    /// The catalog shipped with the site.
    pub fn builtin() -> Self {
        builtin::builtin()
    }

    /// Load a catalog from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CommerceError::CatalogError(format!("{}: {}", path.display(), e)))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn private_product(&self, id: &ProductId) -> Option<&PrivateProduct> {
        self.private.iter().find(|p| &p.id == id)
    }

    pub fn business_product(&self, id: &ProductId) -> Option<&BusinessProduct> {
        self.business.iter().find(|p| &p.id == id)
    }

    pub fn event_package(&self, id: &ProductId) -> Option<&EventPackage> {
        self.events.iter().find(|p| &p.id == id)
    }

    /// Event packages matching a category filter, in catalog order.
    pub fn events_matching(&self, filter: EventFilter) -> impl Iterator<Item = &EventPackage> {
        self.events.iter().filter(move |p| filter.matches(p.category))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.private.len(), 3);
        assert_eq!(catalog.business.len(), 5);
        assert_eq!(catalog.events.len(), 6);
    }

    #[test]
    fn test_builtin_prices() {
        let catalog = Catalog::builtin();
        let spring = catalog.private_product(&ProductId::new("pure-spring")).unwrap();
        assert_eq!(spring.size("250ml").unwrap().price.minor_units, 250);
        assert_eq!(spring.size("750ml").unwrap().price.currency, Currency::CHF);

        let furnishing = catalog
            .business_product(&ProductId::new("monthly-furnishing"))
            .unwrap();
        assert_eq!(furnishing.price.minor_units, 45_000);
        assert_eq!(furnishing.min_order, Some(50));
    }

    #[test]
    fn test_events_matching_filter() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.events_matching(EventFilter::All).count(), 6);

        let parties: Vec<_> = catalog
            .events_matching(EventFilter::Only(EventCategory::Party))
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(parties, vec!["party-basic", "party-premium"]);
    }

    #[test]
    fn test_load_json_catalog() {
        let dir = std::env::temp_dir().join(format!("sbr-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");

        let mut catalog = Catalog::builtin();
        catalog.events.clear();
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded, catalog);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load("/nonexistent/catalog.toml");
        assert!(matches!(result, Err(CommerceError::CatalogError(_))));
    }
}
