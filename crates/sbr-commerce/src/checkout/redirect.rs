//! Hand-off to the hosted payment page.

use std::sync::{Mutex, PoisonError};

use crate::checkout::session::PaymentSession;
use crate::error::CommerceError;

/// Sends the shopper to the hosted payment flow for a session.
pub trait HostedCheckout: Send + Sync {
    fn redirect(&self, session: &PaymentSession) -> Result<(), CommerceError>;
}

/// Build the hosted payment page URL for a session.
pub fn hosted_checkout_url(base_url: &str, session_id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), session_id)
}

/// Resolves sessions to hosted-page links and remembers the last one.
///
/// Used where there is no browser to navigate, e.g. the CLI prints the link.
#[derive(Debug)]
pub struct LinkRedirect {
    base_url: String,
    last: Mutex<Option<String>>,
}

impl LinkRedirect {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            last: Mutex::new(None),
        }
    }

    /// The most recent link handed out.
    pub fn last_url(&self) -> Option<String> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HostedCheckout for LinkRedirect {
    fn redirect(&self, session: &PaymentSession) -> Result<(), CommerceError> {
        if session.session_id.trim().is_empty() {
            return Err(CommerceError::Redirect("empty session id".to_string()));
        }

        let url = hosted_checkout_url(&self.base_url, &session.session_id);
        tracing::info!(%url, "redirecting to hosted checkout");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_url() {
        assert_eq!(
            hosted_checkout_url("https://checkout.stripe.com/pay/", "cs_1"),
            "https://checkout.stripe.com/pay/cs_1"
        );
    }

    #[test]
    fn test_link_redirect_records_url() {
        let redirect = LinkRedirect::new("https://checkout.stripe.com/pay");
        redirect
            .redirect(&PaymentSession {
                session_id: "cs_42".to_string(),
            })
            .unwrap();
        assert_eq!(
            redirect.last_url().as_deref(),
            Some("https://checkout.stripe.com/pay/cs_42")
        );
    }

    #[test]
    fn test_empty_session_rejected() {
        let redirect = LinkRedirect::new("https://checkout.stripe.com/pay");
        let result = redirect.redirect(&PaymentSession {
            session_id: " ".to_string(),
        });
        assert!(matches!(result, Err(CommerceError::Redirect(_))));
        assert!(redirect.last_url().is_none());
    }
}
