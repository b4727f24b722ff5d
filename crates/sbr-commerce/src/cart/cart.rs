//! Cart and line item types.

use crate::cart::{CartSummary, LinePricing, PurchaseCategory};
use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Display metadata for a line item being added.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMetadata {
    /// Display label.
    pub name: String,
    /// Purchase category the item belongs to.
    pub category: PurchaseCategory,
    /// Price per unit.
    pub unit_price: Money,
    /// Size or unit descriptor.
    pub detail: Option<String>,
}

impl ItemMetadata {
    pub fn new(name: impl Into<String>, category: PurchaseCategory, unit_price: Money) -> Self {
        Self {
            name: name.into(),
            category,
            unit_price,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// What an add did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was raised; carries the new quantity.
    Incremented { quantity: i64 },
}

/// A shopping cart.
///
/// Lines are kept in insertion order, at most one per [`LineItemId`], each
/// with a quantity of at least one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Identifies this cart instance.
    pub id: CartId,
    /// Cart currency.
    pub currency: Currency,
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            id: CartId::generate(),
            currency,
            items: Vec::new(),
        }
    }

    /// Add `quantity` units of an item.
    ///
    /// An existing line with the same id has its quantity raised (saturating);
    /// otherwise a new line is appended. Callers guarantee `quantity >= 1`.
    pub fn add(&mut self, id: LineItemId, metadata: ItemMetadata, quantity: i64) -> AddOutcome {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }

        self.items.push(LineItem {
            id,
            name: metadata.name,
            category: metadata.category,
            quantity,
            unit_price: metadata.unit_price,
            detail: metadata.detail,
        });
        AddOutcome::Added
    }

    /// Set an item's quantity.
    ///
    /// Quantities below one are ignored; use [`Cart::remove`] to drop a line.
    /// Returns whether a line was changed.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> bool {
        if quantity < 1 {
            return false;
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove an item from the cart.
    pub fn remove(&mut self, id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get total unit count (sum of quantities).
    pub fn unit_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Sum of unit price times quantity over every line.
    ///
    /// Computed fresh on each call.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(self.currency), |acc, item| {
            let line = item.line_total()?;
            acc.try_add(&line).ok_or_else(|| {
                if line.currency != self.currency {
                    CommerceError::CurrencyMismatch {
                        expected: self.currency.code().to_string(),
                        got: line.currency.code().to_string(),
                    }
                } else {
                    CommerceError::Overflow
                }
            })
        })
    }

    /// Per-line breakdown plus totals.
    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        let lines = self
            .items
            .iter()
            .map(|item| {
                Ok(LinePricing {
                    line_item_id: item.id.clone(),
                    name: item.name.clone(),
                    detail: item.detail.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    line_total: item.line_total()?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(CartSummary {
            item_count: self.item_count(),
            unit_count: self.unit_count(),
            total: self.total()?,
            lines,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

/// A line item in the cart.
///
/// On the wire the unit price is a decimal number (`"price": 2.5`) and the
/// category is the line's item type (`"type": "event"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(into = "LineItemWire", try_from = "LineItemWire")]
pub struct LineItem {
    /// De-duplication key (product plus variant).
    pub id: LineItemId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Purchase category.
    pub category: PurchaseCategory,
    /// Quantity, at least one.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Size or unit descriptor.
    pub detail: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct LineItemWire {
    id: LineItemId,
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    quantity: i64,
    price: f64,
    #[serde(default)]
    currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl From<LineItem> for LineItemWire {
    fn from(item: LineItem) -> Self {
        Self {
            item_type: item.category.item_type().to_string(),
            price: item.unit_price.to_decimal(),
            currency: item.unit_price.currency,
            id: item.id,
            name: item.name,
            quantity: item.quantity,
            details: item.detail,
        }
    }
}

impl TryFrom<LineItemWire> for LineItem {
    type Error = CommerceError;

    fn try_from(wire: LineItemWire) -> Result<Self, Self::Error> {
        if wire.quantity < 1 {
            return Err(CommerceError::InvalidQuantity(wire.quantity));
        }
        Ok(Self {
            category: wire.item_type.parse()?,
            unit_price: Money::from_decimal(wire.price, wire.currency)?,
            id: wire.id,
            name: wire.name,
            quantity: wire.quantity,
            detail: wire.details,
        })
    }
}

impl LineItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    /// Label with the detail appended, e.g. "Pure Spring (250ml)".
    pub fn label(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} ({})", self.name, detail),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chf(minor: i64) -> Money {
        Money::new(minor, Currency::CHF)
    }

    fn spring_250() -> (LineItemId, ItemMetadata) {
        (
            LineItemId::new("pure-spring-250ml"),
            ItemMetadata::new("Pure Spring", PurchaseCategory::Private, chf(250)).with_detail("250ml"),
        )
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::CHF);
        assert!(cart.is_empty());
        assert_eq!(cart.total().unwrap(), chf(0));
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new(Currency::CHF);
        let (id, meta) = spring_250();

        assert_eq!(cart.add(id.clone(), meta.clone(), 1), AddOutcome::Added);
        assert_eq!(
            cart.add(id.clone(), meta, 2),
            AddOutcome::Incremented { quantity: 3 }
        );

        assert_eq!(cart.item_count(), 1);
        let line = cart.get(&id).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.line_total().unwrap(), chf(750));
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new(Currency::CHF);
        for id in ["c", "a", "b"] {
            cart.add(
                LineItemId::new(id),
                ItemMetadata::new(id, PurchaseCategory::Business, chf(100)),
                1,
            );
        }
        cart.add(
            LineItemId::new("a"),
            ItemMetadata::new("a", PurchaseCategory::Business, chf(100)),
            1,
        );

        let order: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_update_quantity_ignores_below_one() {
        let mut cart = Cart::new(Currency::CHF);
        let (id, meta) = spring_250();
        cart.add(id.clone(), meta, 2);

        assert!(!cart.update_quantity(&id, 0));
        assert!(!cart.update_quantity(&id, -1));
        assert_eq!(cart.get(&id).unwrap().quantity, 2);

        assert!(cart.update_quantity(&id, 5));
        assert_eq!(cart.get(&id).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_unknown_item() {
        let mut cart = Cart::new(Currency::CHF);
        assert!(!cart.update_quantity(&LineItemId::new("missing"), 3));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new(Currency::CHF);
        let (id, meta) = spring_250();
        cart.add(id.clone(), meta, 1);

        assert!(!cart.remove(&LineItemId::new("missing")));
        assert_eq!(cart.item_count(), 1);

        assert!(cart.remove(&id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_of_business_products() {
        let mut cart = Cart::new(Currency::CHF);
        cart.add(
            LineItemId::new("monthly-furnishing"),
            ItemMetadata::new("Monthly Furnishing", PurchaseCategory::Business, chf(45_000)),
            1,
        );
        cart.add(
            LineItemId::new("pallet-pure-spring"),
            ItemMetadata::new("Pallet - Pure Spring", PurchaseCategory::Business, chf(120_000)),
            1,
        );

        assert_eq!(cart.total().unwrap(), chf(165_000));
        assert_eq!(cart.total().unwrap().display(), "CHF 1650.00");
    }

    #[test]
    fn test_total_is_order_independent() {
        let build = |ops: &[(&str, i64, i64)]| {
            let mut cart = Cart::new(Currency::CHF);
            for (id, price, qty) in ops {
                cart.add(
                    LineItemId::new(*id),
                    ItemMetadata::new(*id, PurchaseCategory::Private, chf(*price)),
                    *qty,
                );
            }
            cart
        };

        let mut a = build(&[("x", 250, 1), ("y", 450, 2), ("z", 650, 1)]);
        let mut b = build(&[("z", 650, 1), ("y", 450, 1), ("x", 250, 3)]);
        a.remove(&LineItemId::new("z"));
        b.remove(&LineItemId::new("z"));
        b.update_quantity(&LineItemId::new("x"), 1);
        b.update_quantity(&LineItemId::new("y"), 2);

        assert_eq!(a.total().unwrap(), b.total().unwrap());
        assert_eq!(a.total().unwrap(), chf(250 + 900));
    }

    #[test]
    fn test_total_overflow_is_reported() {
        let mut cart = Cart::new(Currency::CHF);
        cart.add(
            LineItemId::new("huge"),
            ItemMetadata::new("Huge", PurchaseCategory::Business, chf(i64::MAX)),
            2,
        );
        assert!(matches!(cart.total(), Err(CommerceError::Overflow)));
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new(Currency::CHF);
        let (id, meta) = spring_250();
        cart.add(id, meta, 3);

        let summary = cart.summary().unwrap();
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.unit_count, 3);
        assert_eq!(summary.lines[0].line_total, chf(750));
        assert_eq!(summary.total, chf(750));
    }

    #[test]
    fn test_line_item_wire_format() {
        let mut cart = Cart::new(Currency::CHF);
        let (id, meta) = spring_250();
        cart.add(id, meta, 1);

        let json = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(json["id"], "pure-spring-250ml");
        assert_eq!(json["type"], "private");
        assert!(json["price"].is_number());
        assert_eq!(json["price"], 2.5);
        assert_eq!(json["details"], "250ml");
    }

    #[test]
    fn test_event_line_wire_format() {
        let mut cart = Cart::new(Currency::CHF);
        cart.add(
            LineItemId::new("party-basic"),
            ItemMetadata::new("Party - Basic", PurchaseCategory::Event, chf(20_000)).with_detail("party"),
            1,
        );

        let json = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(json["type"], "event");
        assert_eq!(json["price"], 200.0);

        let back: LineItem = serde_json::from_value(json).unwrap();
        assert_eq!(&back, &cart.items()[0]);
    }

    #[test]
    fn test_line_item_from_site_payload() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":"alpine-burst-750ml","name":"Alpine Burst","type":"private","quantity":2,"price":7.5,"details":"750ml"}"#,
        )
        .unwrap();
        assert_eq!(item.unit_price, chf(750));
        assert_eq!(item.line_total().unwrap(), chf(1500));

        assert!(serde_json::from_str::<LineItem>(
            r#"{"id":"a","name":"A","type":"wholesale","quantity":1,"price":1}"#
        )
        .is_err());
        assert!(serde_json::from_str::<LineItem>(
            r#"{"id":"a","name":"A","type":"private","quantity":0,"price":1}"#
        )
        .is_err());
    }
}
