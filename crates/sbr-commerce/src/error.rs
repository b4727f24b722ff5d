//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Size not offered for a product.
    #[error("Size {size} not available for {product_id}")]
    SizeNotFound { product_id: String, size: String },

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Product belongs to a different purchase category than the active one.
    #[error("Cannot add {product_id} ({got}) while shopping as {active}")]
    CategoryMismatch {
        product_id: String,
        active: String,
        got: String,
    },

    /// Category name not recognised.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Selection draft is missing a product or size.
    #[error("Selection incomplete: missing {0}")]
    SelectionIncomplete(&'static str),

    /// The shop modal is closed; its cart no longer exists.
    #[error("Shop is closed")]
    ShopClosed,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Line quantity below one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Money string could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Hosted checkout redirect failed.
    #[error("Redirect failed: {0}")]
    Redirect(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Catalog file could not be read.
    #[error("Catalog error: {0}")]
    CatalogError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
