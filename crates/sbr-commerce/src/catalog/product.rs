//! Product types for the three purchase categories.

use std::str::FromStr;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A bottle size with its price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeOption {
    /// Size label (e.g., "250ml").
    pub size: String,
    /// Price per bottle.
    pub price: Money,
}

impl SizeOption {
    pub fn new(size: impl Into<String>, price: Money) -> Self {
        Self {
            size: size.into(),
            price,
        }
    }
}

/// A bottled water sold to private customers, priced per size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrivateProduct {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Marketing tagline.
    pub description: String,
    /// Product image path.
    pub image: String,
    /// Available sizes, smallest first.
    pub sizes: Vec<SizeOption>,
}

impl PrivateProduct {
    /// Look up a size option by label.
    pub fn size(&self, size: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.size == size)
    }

    /// Cheapest size price, for "from CHF x" labels.
    pub fn starting_price(&self) -> Option<Money> {
        self.sizes.iter().map(|s| s.price).min()
    }
}

/// Business product kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessKind {
    /// Recurring office delivery.
    Monthly,
    /// Bulk pallet order.
    Pallet,
}

impl BusinessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessKind::Monthly => "monthly",
            BusinessKind::Pallet => "pallet",
        }
    }
}

/// A product sold to businesses at a fixed unit price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessProduct {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Monthly furnishing or pallet.
    pub kind: BusinessKind,
    /// Price per unit.
    pub price: Money,
    /// Unit descriptor (e.g., "per pallet (144 bottles)").
    pub unit: String,
    /// Minimum order, in bottles, where one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order: Option<u32>,
}

/// Event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Work,
    Cultural,
    Party,
}

impl EventCategory {
    /// All categories in display order.
    pub const ALL: [EventCategory; 3] = [
        EventCategory::Work,
        EventCategory::Cultural,
        EventCategory::Party,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Work => "work",
            EventCategory::Cultural => "cultural",
            EventCategory::Party => "party",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EventCategory::Work => "Work Events",
            EventCategory::Cultural => "Cultural Events",
            EventCategory::Party => "Parties",
        }
    }

}

impl FromStr for EventCategory {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(EventCategory::Work),
            "cultural" => Ok(EventCategory::Cultural),
            "party" => Ok(EventCategory::Party),
            _ => Err(CommerceError::UnknownCategory(s.to_string())),
        }
    }
}

/// A water service package for events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPackage {
    /// Unique package identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Event category.
    pub category: EventCategory,
    /// Package image URL.
    pub image: String,
    /// Base price per event.
    pub base_price: Money,
    /// What the package includes.
    pub includes: Vec<String>,
}
