//! Cart manager: the cart plus the shopping context around it.

use std::sync::Arc;

use tracing::debug;

use crate::cart::{AddOutcome, Cart, CartSummary, ItemMetadata, PurchaseCategory, SelectionDraft};
use crate::catalog::{BusinessProduct, Catalog, EventPackage};
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use crate::notify::{Notification, NotificationSink};

// Single-unit adds name the product only, without a quantity.
#[derive(Debug, Clone, Copy)]
enum AddNotice {
    Quantity,
    SingleUnit,
}

/// Owns one cart, the active purchase category and the selection draft.
///
/// Every add emits a notification naming the item and the quantity added.
pub struct CartManager {
    cart: Cart,
    category: PurchaseCategory,
    selection: SelectionDraft,
    notifier: Arc<dyn NotificationSink>,
}

impl CartManager {
    /// Create an empty cart in the private category.
    pub fn new(currency: Currency, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            cart: Cart::new(currency),
            category: PurchaseCategory::default(),
            selection: SelectionDraft::new(),
            notifier,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn category(&self) -> PurchaseCategory {
        self.category
    }

    pub fn selection(&self) -> &SelectionDraft {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionDraft {
        &mut self.selection
    }

    /// Add `quantity` units of an item and notify the shopper.
    pub fn add_item(&mut self, id: LineItemId, metadata: ItemMetadata, quantity: i64) -> AddOutcome {
        self.add_line(id, metadata, quantity, AddNotice::Quantity)
    }

    /// Set a line's quantity; values below one are ignored.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> bool {
        let changed = self.cart.update_quantity(id, quantity);
        debug!(line_item = %id, quantity, changed, "cart update");
        changed
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, id: &LineItemId) -> bool {
        let removed = self.cart.remove(id);
        debug!(line_item = %id, removed, "cart remove");
        removed
    }

    /// Current total, recomputed on every call.
    pub fn compute_total(&self) -> Result<Money, CommerceError> {
        self.cart.total()
    }

    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        self.cart.summary()
    }

    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Change the purchase category.
    ///
    /// Discards the cart and the selection draft whenever the category changes.
    pub fn switch_category(&mut self, category: PurchaseCategory) {
        if category != self.category {
            debug!(from = %self.category, to = %category, "switching purchase category");
        }
        self.category = category;
        self.cart.clear();
        self.selection.reset();
    }

    /// Add the drafted bottled water (product, size, quantity) and reset the draft.
    pub fn add_selected_private(&mut self, catalog: &Catalog) -> Result<AddOutcome, CommerceError> {
        self.ensure_category(PurchaseCategory::Private, "selection")?;

        let product_id = self
            .selection
            .product
            .clone()
            .ok_or(CommerceError::SelectionIncomplete("product"))?;
        let size = self
            .selection
            .size
            .clone()
            .ok_or(CommerceError::SelectionIncomplete("size"))?;

        let product = catalog
            .private_product(&product_id)
            .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
        let option = product.size(&size).ok_or_else(|| CommerceError::SizeNotFound {
            product_id: product_id.to_string(),
            size: size.clone(),
        })?;

        let metadata = ItemMetadata::new(&product.name, PurchaseCategory::Private, option.price)
            .with_detail(&size);
        let quantity = self.selection.quantity();
        let outcome = self.add_item(LineItemId::for_variant(&product_id, &size), metadata, quantity);

        self.selection.reset_product();
        Ok(outcome)
    }

    /// Add one unit of a business product.
    pub fn add_business(&mut self, product: &BusinessProduct) -> Result<AddOutcome, CommerceError> {
        self.ensure_category(PurchaseCategory::Business, product.id.as_str())?;

        let metadata = ItemMetadata::new(&product.name, PurchaseCategory::Business, product.price)
            .with_detail(&product.unit);
        Ok(self.add_unit(LineItemId::for_product(&product.id), metadata))
    }

    /// Add one unit of an event package.
    pub fn add_event(&mut self, package: &EventPackage) -> Result<AddOutcome, CommerceError> {
        self.ensure_category(PurchaseCategory::Event, package.id.as_str())?;

        let metadata = ItemMetadata::new(&package.name, PurchaseCategory::Event, package.base_price)
            .with_detail(package.category.as_str());
        Ok(self.add_unit(LineItemId::for_product(&package.id), metadata))
    }

    /// Look up a business or event product by id and add it.
    ///
    /// A product from another category is rejected with
    /// [`CommerceError::CategoryMismatch`]. Bottled waters need a size and
    /// go through [`CartManager::add_selected_private`].
    pub fn add_product(&mut self, catalog: &Catalog, id: &ProductId) -> Result<AddOutcome, CommerceError> {
        if let Some(product) = catalog.business_product(id) {
            self.add_business(product)
        } else if let Some(package) = catalog.event_package(id) {
            self.add_event(package)
        } else if catalog.private_product(id).is_some() {
            self.ensure_category(PurchaseCategory::Private, id.as_str())?;
            Err(CommerceError::SelectionIncomplete("size"))
        } else {
            Err(CommerceError::ProductNotFound(id.to_string()))
        }
    }

    fn add_unit(&mut self, id: LineItemId, metadata: ItemMetadata) -> AddOutcome {
        self.add_line(id, metadata, 1, AddNotice::SingleUnit)
    }

    fn add_line(&mut self, id: LineItemId, metadata: ItemMetadata, quantity: i64, notice: AddNotice) -> AddOutcome {
        let outcome = self.cart.add(id.clone(), metadata, quantity);
        debug!(line_item = %id, quantity, ?outcome, "cart add");

        if let Some(line) = self.cart.get(&id) {
            let notification = match (notice, outcome) {
                (AddNotice::Quantity, AddOutcome::Added) => {
                    Notification::success("Added to cart!", format!("{} x{}", line.label(), quantity))
                }
                (AddNotice::Quantity, AddOutcome::Incremented { .. }) => Notification::success(
                    "Cart updated!",
                    format!("Added {} more {}", quantity, line.label()),
                ),
                (AddNotice::SingleUnit, AddOutcome::Added) => {
                    Notification::success("Added to cart!", line.name.clone())
                }
                (AddNotice::SingleUnit, AddOutcome::Incremented { .. }) => {
                    Notification::success("Cart updated!", format!("Added another {}", line.name))
                }
            };
            self.notifier.notify(notification);
        }

        outcome
    }

    fn ensure_category(&self, expected: PurchaseCategory, product_id: &str) -> Result<(), CommerceError> {
        if self.category == expected {
            Ok(())
        } else {
            Err(CommerceError::CategoryMismatch {
                product_id: product_id.to_string(),
                active: self.category.to_string(),
                got: expected.to_string(),
            })
        }
    }
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("category", &self.category)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemorySink;

    fn manager() -> (CartManager, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (CartManager::new(Currency::CHF, sink.clone()), sink)
    }

    fn chf(minor: i64) -> Money {
        Money::new(minor, Currency::CHF)
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let (mut manager, _) = manager();
        let id = LineItemId::new("pure-spring-250ml");
        let meta = ItemMetadata::new("Pure Spring", PurchaseCategory::Private, chf(250));

        for qty in [1, 4, 2, 3] {
            manager.add_item(id.clone(), meta.clone(), qty);
        }

        assert_eq!(manager.cart().item_count(), 1);
        assert_eq!(manager.cart().get(&id).unwrap().quantity, 10);
    }

    #[test]
    fn test_add_notifications() {
        let (mut manager, sink) = manager();
        let id = LineItemId::new("pure-spring-250ml");
        let meta = ItemMetadata::new("Pure Spring", PurchaseCategory::Private, chf(250)).with_detail("250ml");

        manager.add_item(id.clone(), meta.clone(), 1);
        manager.add_item(id, meta, 2);

        let entries = sink.entries();
        assert_eq!(entries[0].title, "Added to cart!");
        assert_eq!(entries[0].description, "Pure Spring (250ml) x1");
        assert_eq!(entries[1].title, "Cart updated!");
        assert_eq!(entries[1].description, "Added 2 more Pure Spring (250ml)");
    }

    #[test]
    fn test_pure_spring_scenario() {
        let (mut manager, _) = manager();
        let catalog = Catalog::builtin();

        manager.selection_mut().select_product(ProductId::new("pure-spring"));
        manager.selection_mut().select_size("250ml");
        manager.add_selected_private(&catalog).unwrap();

        manager.selection_mut().select_product(ProductId::new("pure-spring"));
        manager.selection_mut().select_size("250ml");
        manager.selection_mut().set_quantity(2);
        let outcome = manager.add_selected_private(&catalog).unwrap();
        assert_eq!(outcome, AddOutcome::Incremented { quantity: 3 });

        let summary = manager.summary().unwrap();
        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.lines[0].quantity, 3);
        assert_eq!(summary.lines[0].line_total, chf(750));
        assert!(manager.selection().is_cleared());
    }

    #[test]
    fn test_add_selected_requires_size() {
        let (mut manager, sink) = manager();
        manager.selection_mut().select_product(ProductId::new("pure-spring"));

        let result = manager.add_selected_private(&Catalog::builtin());
        assert!(matches!(result, Err(CommerceError::SelectionIncomplete("size"))));
        assert!(manager.cart().is_empty());
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_add_selected_unknown_size() {
        let (mut manager, _) = manager();
        manager.selection_mut().select_product(ProductId::new("pure-spring"));
        manager.selection_mut().select_size("2l");

        let result = manager.add_selected_private(&Catalog::builtin());
        assert!(matches!(result, Err(CommerceError::SizeNotFound { .. })));
    }

    #[test]
    fn test_business_scenario_total() {
        let (mut manager, sink) = manager();
        let catalog = Catalog::builtin();
        manager.switch_category(PurchaseCategory::Business);

        manager.add_product(&catalog, &ProductId::new("monthly-furnishing")).unwrap();
        manager.add_product(&catalog, &ProductId::new("pallet-pure-spring")).unwrap();

        assert_eq!(manager.compute_total().unwrap(), chf(165_000));
        assert_eq!(sink.entries()[0].description, "Monthly Furnishing");
    }

    #[test]
    fn test_add_another_event_package() {
        let (mut manager, sink) = manager();
        let catalog = Catalog::builtin();
        manager.switch_category(PurchaseCategory::Event);

        let id = ProductId::new("party-basic");
        manager.add_product(&catalog, &id).unwrap();
        manager.add_product(&catalog, &id).unwrap();

        let line = manager.cart().get(&LineItemId::for_product(&id)).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.detail.as_deref(), Some("party"));
        assert_eq!(sink.last().unwrap().description, "Added another Party - Basic");
    }

    #[test]
    fn test_category_mismatch_rejected() {
        let (mut manager, _) = manager();
        let catalog = Catalog::builtin();
        let pallet = catalog
            .business_product(&ProductId::new("mixed-pallet"))
            .unwrap();

        let result = manager.add_business(pallet);
        assert!(matches!(result, Err(CommerceError::CategoryMismatch { .. })));
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_add_product_from_other_category_rejected() {
        let (mut manager, sink) = manager();
        let catalog = Catalog::builtin();

        let result = manager.add_product(&catalog, &ProductId::new("monthly-furnishing"));
        assert!(matches!(result, Err(CommerceError::CategoryMismatch { .. })));

        manager.switch_category(PurchaseCategory::Business);
        let result = manager.add_product(&catalog, &ProductId::new("party-basic"));
        assert!(matches!(result, Err(CommerceError::CategoryMismatch { .. })));
        let result = manager.add_product(&catalog, &ProductId::new("pure-spring"));
        assert!(matches!(result, Err(CommerceError::CategoryMismatch { .. })));

        assert!(manager.cart().is_empty());
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_add_product_private_and_unknown() {
        let (mut manager, _) = manager();
        let catalog = Catalog::builtin();

        let result = manager.add_product(&catalog, &ProductId::new("pure-spring"));
        assert!(matches!(result, Err(CommerceError::SelectionIncomplete("size"))));
        let result = manager.add_product(&catalog, &ProductId::new("no-such-product"));
        assert!(matches!(result, Err(CommerceError::ProductNotFound(_))));
    }

    #[test]
    fn test_add_notice_uses_line_label() {
        let (mut manager, sink) = manager();
        let id = LineItemId::new("alpine-burst-750ml");
        manager.add_item(
            id.clone(),
            ItemMetadata::new("Alpine Burst", PurchaseCategory::Private, chf(750)).with_detail("750ml"),
            2,
        );

        let line = manager.cart().get(&id).unwrap();
        assert_eq!(sink.last().unwrap().description, format!("{} x2", line.label()));
    }

    #[test]
    fn test_switch_category_clears_everything() {
        let (mut manager, _) = manager();
        let catalog = Catalog::builtin();

        manager.selection_mut().select_product(ProductId::new("alpine-burst"));
        manager.selection_mut().select_size("500ml");
        manager.add_selected_private(&catalog).unwrap();
        manager.selection_mut().select_product(ProductId::new("sparkling-crest"));
        manager.selection_mut().set_quantity(3);

        manager.switch_category(PurchaseCategory::Event);
        assert!(manager.cart().is_empty());
        assert!(manager.selection().is_cleared());

        // Re-selecting the active category still clears.
        manager.add_product(&catalog, &ProductId::new("work-event-basic")).unwrap();
        manager.switch_category(PurchaseCategory::Event);
        assert!(manager.cart().is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (mut manager, _) = manager();
        manager.add_item(
            LineItemId::new("a"),
            ItemMetadata::new("A", PurchaseCategory::Private, chf(100)),
            1,
        );
        let before = manager.cart().clone();
        assert!(!manager.remove_item(&LineItemId::new("b")));
        assert_eq!(manager.cart(), &before);
    }
}
