//! The shop modal: one cart per opening, plus the checkout hand-off.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cart::{
    AddOutcome, Cart, CartManager, CartSummary, EventFilter, PurchaseCategory,
};
use crate::catalog::Catalog;
use crate::checkout::redirect::HostedCheckout;
use crate::checkout::session::{PaymentSessionProvider, PaymentSessionRequest};
use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId, ProductId};
use crate::money::{Currency, Money};
use crate::notify::{Notification, NotificationSink};

/// Why a checkout request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The cart has no items.
    EmptyCart,
    /// A checkout for this cart is already waiting on the payment service.
    InFlight,
    /// The modal is closed.
    Closed,
}

/// Confirmation shown when checkout falls back to a simulated purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub category: PurchaseCategory,
    pub item_count: usize,
    /// `None` when the cart total cannot be represented.
    pub total: Option<Money>,
}

impl CheckoutSummary {
    /// One-line description used in the confirmation notification.
    pub fn message(&self) -> String {
        let total = match &self.total {
            Some(total) => total.display(),
            None => "unavailable".to_string(),
        };
        format!(
            "Purchase Type: {} | Items: {} | Total: {}",
            self.category, self.item_count, total
        )
    }
}

/// Result of [`ShopModal::checkout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// A payment session was created and handed to the hosted checkout.
    Redirected { session_id: String },
    /// No session could be created; the purchase was confirmed as a simulation.
    Simulated(CheckoutSummary),
    /// Preconditions were not met; nothing happened.
    Skipped(SkipReason),
    /// The modal was closed while waiting; the response was ignored.
    Discarded,
}

impl CheckoutOutcome {
    pub fn is_simulated(&self) -> bool {
        matches!(self, CheckoutOutcome::Simulated(_))
    }
}

/// State of one opening of the modal.
#[derive(Debug)]
struct OpenShop {
    manager: CartManager,
    processing: bool,
}

/// Handle to the shop modal.
///
/// Cloning yields another handle to the same modal. The modal owns at most
/// one cart at a time: opening creates it, closing destroys it.
#[derive(Clone)]
pub struct ShopModal {
    state: Arc<Mutex<Option<OpenShop>>>,
    catalog: Arc<Catalog>,
    payments: Arc<dyn PaymentSessionProvider>,
    hosted: Arc<dyn HostedCheckout>,
    notifier: Arc<dyn NotificationSink>,
    currency: Currency,
}

impl ShopModal {
    /// Create a closed modal.
    pub fn new(
        catalog: Catalog,
        payments: Arc<dyn PaymentSessionProvider>,
        hosted: Arc<dyn HostedCheckout>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(None)),
            catalog: Arc::new(catalog),
            payments,
            hosted,
            notifier,
            currency: Currency::default(),
        }
    }

    /// Set the cart currency for future openings.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Open the modal with a fresh, empty cart. Does nothing if already open.
    pub fn open(&self) {
        let mut state = self.lock();
        if state.is_none() {
            let manager = CartManager::new(self.currency, self.notifier.clone());
            debug!(cart = %manager.cart().id, "shop opened");
            *state = Some(OpenShop {
                manager,
                processing: false,
            });
        }
    }

    /// Close the modal, destroying its cart.
    ///
    /// A checkout still waiting on the payment service is not aborted; its
    /// response is discarded when it arrives.
    pub fn close(&self) {
        if let Some(shop) = self.lock().take() {
            debug!(cart = %shop.manager.cart().id, in_flight = shop.processing, "shop closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Whether the checkout control should be disabled.
    pub fn is_processing(&self) -> bool {
        self.lock().as_ref().is_some_and(|shop| shop.processing)
    }

    /// Copy of the current cart.
    pub fn cart(&self) -> Option<Cart> {
        self.lock().as_ref().map(|shop| shop.manager.cart().clone())
    }

    pub fn category(&self) -> Option<PurchaseCategory> {
        self.lock().as_ref().map(|shop| shop.manager.category())
    }

    pub fn summary(&self) -> Result<CartSummary, CommerceError> {
        self.with_manager(|m| m.summary())?
    }

    pub fn total(&self) -> Result<Money, CommerceError> {
        self.with_manager(|m| m.compute_total())?
    }

    pub fn switch_category(&self, category: PurchaseCategory) -> Result<(), CommerceError> {
        self.with_manager(|m| m.switch_category(category))
    }

    pub fn select_product(&self, id: impl Into<ProductId>) -> Result<(), CommerceError> {
        let id = id.into();
        self.with_manager(|m| m.selection_mut().select_product(id))
    }

    pub fn select_size(&self, size: &str) -> Result<(), CommerceError> {
        self.with_manager(|m| m.selection_mut().select_size(size))
    }

    pub fn set_quantity(&self, quantity: i64) -> Result<(), CommerceError> {
        self.with_manager(|m| m.selection_mut().set_quantity(quantity))
    }

    pub fn increment_quantity(&self) -> Result<(), CommerceError> {
        self.with_manager(|m| m.selection_mut().increment())
    }

    /// Lower the drafted quantity; does nothing at one.
    pub fn decrement_quantity(&self) -> Result<(), CommerceError> {
        self.with_manager(|m| m.selection_mut().decrement())
    }

    pub fn filter_events(&self, filter: EventFilter) -> Result<(), CommerceError> {
        self.with_manager(|m| m.selection_mut().event_filter = filter)
    }

    /// Add the drafted bottled water to the cart.
    pub fn add_selected(&self) -> Result<AddOutcome, CommerceError> {
        let catalog = self.catalog.clone();
        self.with_manager(|m| m.add_selected_private(&catalog))?
    }

    /// Add a business product or event package by id.
    pub fn add_product(&self, id: impl Into<ProductId>) -> Result<AddOutcome, CommerceError> {
        let id = id.into();
        let catalog = self.catalog.clone();
        self.with_manager(|m| m.add_product(&catalog, &id))?
    }

    /// Set a line's quantity; values below one are ignored.
    pub fn update_quantity(&self, id: &LineItemId, quantity: i64) -> bool {
        self.with_manager(|m| m.update_quantity(id, quantity))
            .unwrap_or(false)
    }

    pub fn remove_item(&self, id: &LineItemId) -> bool {
        self.with_manager(|m| m.remove_item(id)).unwrap_or(false)
    }

    /// Check out the current cart.
    ///
    /// Requests a payment session and hands it to the hosted checkout. If no
    /// session can be created, or the hand-off fails, the purchase is
    /// confirmed as a simulation instead: a notification summarises it, the
    /// cart is cleared and the modal closes. Never returns an error.
    pub async fn checkout(&self) -> CheckoutOutcome {
        let (cart_id, request, summary) = match self.begin_checkout() {
            Ok(started) => started,
            Err(reason) => {
                debug!(?reason, "checkout skipped");
                return CheckoutOutcome::Skipped(reason);
            }
        };

        info!(
            cart = %cart_id,
            purchase_type = %request.purchase_type,
            items = request.items.len(),
            "requesting payment session"
        );
        let result = self.payments.create_session(&request).await;

        let mut state = self.lock();
        let shop = match state.as_mut() {
            Some(shop) if shop.manager.cart().id == cart_id => shop,
            _ => {
                debug!(cart = %cart_id, "late payment session response discarded");
                return CheckoutOutcome::Discarded;
            }
        };
        shop.processing = false;

        let failure = match result {
            Ok(session) => match self.hosted.redirect(&session) {
                Ok(()) => {
                    info!(cart = %cart_id, session = %session.session_id, "redirected to hosted checkout");
                    shop.manager.clear();
                    return CheckoutOutcome::Redirected {
                        session_id: session.session_id,
                    };
                }
                Err(e) => e.to_string(),
            },
            Err(e) => e.to_string(),
        };

        warn!(cart = %cart_id, error = %failure, "payment session unavailable, simulating checkout");
        self.notifier
            .notify(Notification::success("Checkout initiated!", summary.message()));
        *state = None;
        CheckoutOutcome::Simulated(summary)
    }

    fn begin_checkout(&self) -> Result<(CartId, PaymentSessionRequest, CheckoutSummary), SkipReason> {
        let mut state = self.lock();
        let shop = state.as_mut().ok_or(SkipReason::Closed)?;
        if shop.processing {
            return Err(SkipReason::InFlight);
        }

        let cart = shop.manager.cart();
        if cart.is_empty() {
            return Err(SkipReason::EmptyCart);
        }

        let total = cart
            .total()
            .inspect_err(|e| warn!(error = %e, "cart total unavailable"))
            .ok();
        let summary = CheckoutSummary {
            category: shop.manager.category(),
            item_count: cart.item_count(),
            total,
        };
        let request = PaymentSessionRequest {
            items: cart.items().to_vec(),
            purchase_type: shop.manager.category(),
        };
        let cart_id = cart.id.clone();

        shop.processing = true;
        Ok((cart_id, request, summary))
    }

    fn with_manager<R>(&self, f: impl FnOnce(&mut CartManager) -> R) -> Result<R, CommerceError> {
        let mut state = self.lock();
        let shop = state.as_mut().ok_or(CommerceError::ShopClosed)?;
        Ok(f(&mut shop.manager))
    }

    fn lock(&self) -> MutexGuard<'_, Option<OpenShop>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ShopModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopModal")
            .field("state", &self.state)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}
