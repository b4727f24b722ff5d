//! Shopping cart module.
//!
//! Contains the cart, line items, pricing summaries, purchase categories,
//! the selection draft and the cart manager that ties them together.

mod cart;
mod category;
mod manager;
mod pricing;
mod selection;

pub use cart::{AddOutcome, Cart, ItemMetadata, LineItem};
pub use category::PurchaseCategory;
pub use manager::CartManager;
pub use pricing::{CartSummary, LinePricing};
pub use selection::{EventFilter, SelectionDraft};
