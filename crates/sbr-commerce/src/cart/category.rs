//! Purchase categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;

/// The shopping context a cart belongs to.
///
/// Categories are not composable: a cart only ever holds items of the
/// active category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PurchaseCategory {
    #[default]
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "events", alias = "event")]
    Event,
}

impl PurchaseCategory {
    /// All categories in tab order.
    pub const ALL: [PurchaseCategory; 3] = [
        PurchaseCategory::Private,
        PurchaseCategory::Business,
        PurchaseCategory::Event,
    ];

    /// Wire name, as sent to the payment-session collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseCategory::Private => "private",
            PurchaseCategory::Business => "business",
            PurchaseCategory::Event => "events",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PurchaseCategory::Private => "Private",
            PurchaseCategory::Business => "Business",
            PurchaseCategory::Event => "Events",
        }
    }

    /// Name used for the `type` of a line item. Event lines are `event`,
    /// while the purchase type of an event order is `events`.
    pub fn item_type(&self) -> &'static str {
        match self {
            PurchaseCategory::Private => "private",
            PurchaseCategory::Business => "business",
            PurchaseCategory::Event => "event",
        }
    }
}

impl FromStr for PurchaseCategory {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(PurchaseCategory::Private),
            "business" => Ok(PurchaseCategory::Business),
            "event" | "events" => Ok(PurchaseCategory::Event),
            _ => Err(CommerceError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for PurchaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
