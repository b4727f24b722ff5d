//! Payment-session collaborator interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{LineItem, PurchaseCategory};

/// Body sent to the payment-session collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSessionRequest {
    /// Full cart contents.
    pub items: Vec<LineItem>,
    /// Active purchase category.
    pub purchase_type: PurchaseCategory,
}

/// A hosted payment session created by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub session_id: String,
}

/// Error payload returned by the collaborator on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    pub error: String,
}

/// Why no payment session was created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentSessionError {
    /// The collaborator could not be reached.
    #[error("Payment service unreachable: {0}")]
    Unreachable(String),

    /// The collaborator answered with a non-success status.
    #[error("Payment service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The collaborator has no payment credentials configured.
    #[error("Payment service not configured: {0}")]
    NotConfigured(String),
}

impl PaymentSessionError {
    /// Classify a non-success response by its error message.
    pub fn from_response(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_lowercase().contains("not configured") {
            PaymentSessionError::NotConfigured(message)
        } else {
            PaymentSessionError::Rejected { status, message }
        }
    }
}

/// Creates hosted payment sessions.
#[async_trait]
pub trait PaymentSessionProvider: Send + Sync {
    /// Request a payment session for the given cart contents.
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, PaymentSessionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ItemMetadata;
    use crate::cart::Cart;
    use crate::ids::LineItemId;
    use crate::money::{Currency, Money};

    #[test]
    fn test_request_wire_format() {
        let mut cart = Cart::new(Currency::CHF);
        cart.add(
            LineItemId::new("party-basic"),
            ItemMetadata::new("Party - Basic", PurchaseCategory::Event, Money::from_major(200, Currency::CHF))
                .with_detail("party"),
            1,
        );
        let request = PaymentSessionRequest {
            items: cart.items().to_vec(),
            purchase_type: PurchaseCategory::Event,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["purchaseType"], "events");
        assert_eq!(json["items"][0]["type"], "event");
        assert_eq!(json["items"][0]["price"], 200.0);
        assert_eq!(json["items"][0]["quantity"], 1);
    }

    #[test]
    fn test_session_parses_camel_case() {
        let session: PaymentSession = serde_json::from_str(r#"{"sessionId":"cs_test_123"}"#).unwrap();
        assert_eq!(session.session_id, "cs_test_123");
    }

    #[test]
    fn test_classify_response() {
        assert_eq!(
            PaymentSessionError::from_response(500, "Stripe not configured. Please set up your Stripe keys."),
            PaymentSessionError::NotConfigured(
                "Stripe not configured. Please set up your Stripe keys.".to_string()
            )
        );
        assert!(matches!(
            PaymentSessionError::from_response(502, "Bad gateway"),
            PaymentSessionError::Rejected { status: 502, .. }
        ));
    }
}
