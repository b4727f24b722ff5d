//! In-progress product selection.

use crate::catalog::EventCategory;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Which event packages are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventFilter {
    #[default]
    All,
    Only(EventCategory),
}

impl EventFilter {
    pub fn matches(&self, category: EventCategory) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(only) => *only == category,
        }
    }
}

/// What the shopper is building before pressing "add to cart".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionDraft {
    /// Selected bottled water.
    pub product: Option<ProductId>,
    /// Selected size for that water.
    pub size: Option<String>,
    /// Quantity to add, at least one.
    quantity: i64,
    /// Event package filter.
    pub event_filter: EventFilter,
}

impl SelectionDraft {
    pub fn new() -> Self {
        Self {
            product: None,
            size: None,
            quantity: 1,
            event_filter: EventFilter::All,
        }
    }

    /// Select a product; a previously chosen size is dropped.
    pub fn select_product(&mut self, product: ProductId) {
        if self.product.as_ref() != Some(&product) {
            self.size = None;
        }
        self.product = Some(product);
    }

    pub fn select_size(&mut self, size: impl Into<String>) {
        self.size = Some(size.into());
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Lower the quantity; does nothing at one.
    pub fn decrement(&mut self) {
        if self.can_decrement() {
            self.quantity -= 1;
        }
    }

    /// Whether the decrement control is enabled.
    pub fn can_decrement(&self) -> bool {
        self.quantity > 1
    }

    /// Set the quantity directly; values below one are ignored.
    pub fn set_quantity(&mut self, quantity: i64) {
        if quantity >= 1 {
            self.quantity = quantity;
        }
    }

    /// Clear product, size and quantity, keeping the event filter.
    pub fn reset_product(&mut self) {
        self.product = None;
        self.size = None;
        self.quantity = 1;
    }

    /// Clear everything, including the event filter.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Whether nothing has been picked.
    pub fn is_cleared(&self) -> bool {
        *self == Self::new()
    }
}

impl Default for SelectionDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decrement_stops_at_one() {
        let mut draft = SelectionDraft::new();
        assert!(!draft.can_decrement());
        draft.decrement();
        assert_eq!(draft.quantity(), 1);

        draft.increment();
        draft.increment();
        assert_eq!(draft.quantity(), 3);
        assert!(draft.can_decrement());
        draft.decrement();
        assert_eq!(draft.quantity(), 2);
    }

    #[test]
    fn test_set_quantity_ignores_invalid() {
        let mut draft = SelectionDraft::new();
        draft.set_quantity(0);
        draft.set_quantity(-4);
        assert_eq!(draft.quantity(), 1);
        draft.set_quantity(6);
        assert_eq!(draft.quantity(), 6);
    }

    #[test]
    fn test_switching_product_drops_size() {
        let mut draft = SelectionDraft::new();
        draft.select_product(ProductId::new("pure-spring"));
        draft.select_size("500ml");
        draft.select_product(ProductId::new("pure-spring"));
        assert_eq!(draft.size.as_deref(), Some("500ml"));

        draft.select_product(ProductId::new("alpine-burst"));
        assert_eq!(draft.size, None);
    }

    #[test]
    fn test_reset() {
        let mut draft = SelectionDraft::new();
        draft.select_product(ProductId::new("pure-spring"));
        draft.select_size("250ml");
        draft.set_quantity(4);
        draft.event_filter = EventFilter::Only(EventCategory::Work);

        draft.reset_product();
        assert_eq!(draft.event_filter, EventFilter::Only(EventCategory::Work));
        assert_eq!(draft.quantity(), 1);

        draft.reset();
        assert!(draft.is_cleared());
    }

    #[test]
    fn test_event_filter() {
        assert!(EventFilter::All.matches(EventCategory::Cultural));
        assert!(!EventFilter::Only(EventCategory::Work).matches(EventCategory::Party));
    }
}
