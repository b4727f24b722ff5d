//! Server-side session endpoint stub.
//!
//! The site ships without payment credentials, so its session endpoint
//! always reports that the provider is not configured.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::checkout::session::{
    PaymentSession, PaymentSessionError, PaymentSessionProvider, PaymentSessionRequest,
};

/// Message returned while no payment provider is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "Stripe not configured. Please set up your Stripe keys.";

/// Message returned when the request body cannot be read.
pub const MALFORMED_REQUEST_MESSAGE: &str = "Failed to create checkout session";

/// Payment-session provider with no credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredPaymentSessions;

impl UnconfiguredPaymentSessions {
    pub fn new() -> Self {
        Self
    }

    /// Handle a raw endpoint request body, returning `(status, json body)`.
    ///
    /// Both outcomes are 500: a readable body gets the not-configured error,
    /// an unreadable one the generic failure.
    pub fn respond(&self, body: &[u8]) -> (u16, Value) {
        match serde_json::from_slice::<PaymentSessionRequest>(body) {
            Ok(request) => {
                tracing::debug!(
                    items = request.items.len(),
                    purchase_type = %request.purchase_type,
                    "session requested without payment credentials"
                );
                (500, json!({ "error": NOT_CONFIGURED_MESSAGE }))
            }
            Err(e) => {
                tracing::error!(error = %e, "error creating checkout session");
                (500, json!({ "error": MALFORMED_REQUEST_MESSAGE }))
            }
        }
    }
}

#[async_trait]
impl PaymentSessionProvider for UnconfiguredPaymentSessions {
    async fn create_session(
        &self,
        _request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, PaymentSessionError> {
        Err(PaymentSessionError::NotConfigured(NOT_CONFIGURED_MESSAGE.to_string()))
    }
}
