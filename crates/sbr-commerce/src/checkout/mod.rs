//! Checkout: payment-session requests, hosted-page hand-off and the shop modal.

mod http;
mod modal;
mod redirect;
mod session;
mod stub;

pub use http::{HttpPaymentSessions, DEFAULT_SESSION_PATH};
pub use modal::{CheckoutOutcome, CheckoutSummary, ShopModal, SkipReason};
pub use redirect::{hosted_checkout_url, HostedCheckout, LinkRedirect};
pub use session::{
    ErrorPayload, PaymentSession, PaymentSessionError, PaymentSessionProvider,
    PaymentSessionRequest,
};
pub use stub::{UnconfiguredPaymentSessions, MALFORMED_REQUEST_MESSAGE, NOT_CONFIGURED_MESSAGE};
