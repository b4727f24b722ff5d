//! Observability for the San Bernardino storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component and session context
//! - `SuppressFilter` - Scoped suppression of known third-party failure noise
//! - `init_tracing` - `tracing-subscriber` setup with the suppression filter installed

mod error;
mod filter;
mod init;
mod logging;

pub use error::ObservabilityError;
pub use filter::*;
pub use init::{init_tracing, LoggingConfig};
pub use logging::*;
