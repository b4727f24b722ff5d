//! Storefront domain types and logic for San Bernardino Alpine Waters.
//!
//! This crate provides the state behind the site's two modals:
//!
//! - **Catalog**: Bottled waters with sizes, business supply products, event packages
//! - **Cart**: Line items keyed by product and variant, category switching, selection drafts
//! - **Checkout**: Payment-session hand-off with a simulated fallback
//! - **Web3**: Water NFTs, staking pools and the reserve dashboard (demo data only)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sbr_commerce::prelude::*;
//!
//! let sink = Arc::new(MemorySink::new());
//! let modal = ShopModal::new(
//!     Catalog::builtin(),
//!     Arc::new(UnconfiguredPaymentSessions::new()),
//!     Arc::new(LinkRedirect::new("https://checkout.stripe.com/pay")),
//!     sink.clone(),
//! );
//! modal.open();
//!
//! modal.select_product("pure-spring")?;
//! modal.select_size("250ml")?;
//! modal.add_selected()?;
//!
//! // No payment provider is configured, so this falls back to a simulated confirmation.
//! let outcome = modal.checkout().await;
//! assert!(outcome.is_simulated());
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notify;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod web3;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::notify::{MemorySink, Notification, NotificationLevel, NotificationSink, TracingSink};

    // Catalog
    pub use crate::catalog::{
        BusinessKind, BusinessProduct, Catalog, EventCategory, EventPackage, PrivateProduct,
        SizeOption,
    };

    // Cart
    pub use crate::cart::{
        AddOutcome, Cart, CartManager, CartSummary, EventFilter, ItemMetadata, LineItem,
        LinePricing, PurchaseCategory, SelectionDraft,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutOutcome, CheckoutSummary, HostedCheckout, HttpPaymentSessions, LinkRedirect,
        PaymentSession, PaymentSessionError, PaymentSessionProvider, PaymentSessionRequest,
        ShopModal, SkipReason, UnconfiguredPaymentSessions,
    };

    // Web3
    pub use crate::web3::{
        Nft, NftAttributes, Rarity, ReserveStats, StakingPool, Web3Error, Web3Modal, Web3Tab,
    };
}
