//! HTTP payment-session client.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::checkout::session::{
    ErrorPayload, PaymentSession, PaymentSessionError, PaymentSessionProvider, PaymentSessionRequest,
};

/// Default route of the session endpoint on the site's own API.
pub const DEFAULT_SESSION_PATH: &str = "/api/create-checkout-session";

/// Requests payment sessions from an HTTP endpoint.
///
/// No request timeout is configured: failure is detected from transport
/// errors and non-success responses only.
#[derive(Debug, Clone)]
pub struct HttpPaymentSessions {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPaymentSessions {
    /// Create a client posting to `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a client for `{base_url}/api/create-checkout-session`.
    pub fn for_site(base_url: &str) -> Self {
        Self::new(format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_SESSION_PATH))
    }

    /// Use a preconfigured reqwest client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PaymentSessionProvider for HttpPaymentSessions {
    async fn create_session(
        &self,
        request: &PaymentSessionRequest,
    ) -> Result<PaymentSession, PaymentSessionError> {
        debug!(endpoint = %self.endpoint, items = request.items.len(), "requesting payment session");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentSessionError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<PaymentSession>()
                .await
                .map_err(|e| PaymentSessionError::Rejected {
                    status: status.as_u16(),
                    message: format!("invalid session payload: {}", e),
                });
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorPayload>(&body)
            .map(|payload| payload.error)
            .unwrap_or(body);
        warn!(status = status.as_u16(), %message, "payment session request failed");

        Err(PaymentSessionError::from_response(status.as_u16(), message))
    }
}
