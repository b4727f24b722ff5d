//! Cart pricing breakdown.

use crate::ids::LineItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Number of distinct lines.
    pub item_count: usize,
    /// Sum of quantities.
    pub unit_count: i64,
    /// Sum of line totals.
    pub total: Money,
    /// Per-line breakdown, in display order.
    pub lines: Vec<LinePricing>,
}

impl CartSummary {
    /// Check if the summary has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The most expensive line, if any.
    pub fn largest_line(&self) -> Option<&LinePricing> {
        self.lines.iter().max_by_key(|l| l.line_total)
    }
}

/// Pricing for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// Display name.
    pub name: String,
    /// Size or unit descriptor.
    pub detail: Option<String>,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub line_total: Money,
}
