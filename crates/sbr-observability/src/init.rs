//! Tracing subscriber initialisation.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::error::ObservabilityError;
use crate::filter::{SuppressConfig, SuppressFilter};
use crate::logging::{LogFormat, LogLevel};

/// Noisy dependencies kept at warn regardless of the configured level.
const QUIET_TARGETS: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

/// The `[logging]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    #[serde(flatten)]
    pub suppress: SuppressConfig,
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub fn directive(&self) -> String {
        format!("{},{}", self.level.as_str(), QUIET_TARGETS)
    }

    pub fn suppress_filter(&self) -> SuppressFilter {
        SuppressFilter::new(&self.suppress)
    }
}

/// Install the global subscriber: a stderr `fmt` layer behind the
/// suppression filter, and an `EnvFilter` from `RUST_LOG` or the config.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let env_filter = build_env_filter(config)?;
    let suppress = config.suppress_filter();

    match config.format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(suppress),
            )
            .with(env_filter)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .with_filter(suppress),
            )
            .with(env_filter)
            .try_init()?,
    }

    Ok(())
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, ObservabilityError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        let directive = config.directive();
        EnvFilter::try_new(&directive).map_err(|e| ObservabilityError::InvalidFilter {
            directive,
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Human);
        assert_eq!(config.directive(), "info,hyper=warn,hyper_util=warn,reqwest=warn");
        assert_eq!(config.suppress_filter(), SuppressFilter::default());
    }

    #[test]
    fn test_flattened_patterns() {
        let config: LoggingConfig = serde_json::from_str(
            r#"{"level":"debug","format":"json","suppress_patterns":["x.js"]}"#,
        )
        .unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.suppress.suppress_patterns, vec!["x.js".to_string()]);
    }

    #[test]
    fn test_directive_parses() {
        let config = LoggingConfig {
            level: LogLevel::Trace,
            ..Default::default()
        };
        assert!(EnvFilter::try_new(config.directive()).is_ok());
    }
}
