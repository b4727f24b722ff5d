//! Scoped suppression of known failure noise.
//!
//! A [`SuppressFilter`] is built once from [`SuppressConfig`] at the
//! application boundary and handed to whatever needs it: the
//! [`StructuredLogger`](crate::StructuredLogger), the tracing subscriber, or
//! a handler for unhandled failures. Nothing is patched globally.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Filter};

/// Patterns suppressed when no configuration overrides them.
pub const DEFAULT_SUPPRESS_PATTERNS: [&str; 2] = ["inject.js", "same-runtime"];

/// Suppression settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressConfig {
    /// Substrings that mark a message or stack trace as noise.
    pub suppress_patterns: Vec<String>,
}

impl Default for SuppressConfig {
    fn default() -> Self {
        Self {
            suppress_patterns: DEFAULT_SUPPRESS_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// An unhandled failure reported from outside the application's own code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl FailureReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// A report carrying neither message nor stack.
    pub fn opaque() -> Self {
        Self::default()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    fn stack(&self) -> Option<&str> {
        self.stack.as_deref().filter(|s| !s.is_empty())
    }
}

/// What to do with a failure report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Drop silently.
    Suppress,
    /// Log a warning and carry on.
    Warn,
}

/// Substring matcher over the configured suppress patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressFilter {
    patterns: Vec<String>,
}

impl SuppressFilter {
    pub fn new(config: &SuppressConfig) -> Self {
        Self {
            patterns: config
                .suppress_patterns
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `text` contains any pattern.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }

    /// Decide whether a failure report is noise.
    ///
    /// Suppressed when its message or stack matches a pattern, or when it
    /// carries neither.
    pub fn classify(&self, report: &FailureReport) -> FailureAction {
        let message = report.message();
        let stack = report.stack();

        if message.is_none() && stack.is_none() {
            return FailureAction::Suppress;
        }
        if message.is_some_and(|m| self.matches(m)) || stack.is_some_and(|s| self.matches(s)) {
            return FailureAction::Suppress;
        }
        FailureAction::Warn
    }

    /// Classify a report and log it as a warning unless suppressed.
    pub fn handle(&self, report: &FailureReport) -> FailureAction {
        let action = self.classify(report);
        match action {
            FailureAction::Suppress => {
                tracing::trace!(reason = report.message(), "suppressed unhandled failure");
            }
            FailureAction::Warn => {
                tracing::warn!(
                    reason = report.message(),
                    stack = report.stack(),
                    "unhandled failure"
                );
            }
        }
        action
    }
}

impl Default for SuppressFilter {
    fn default() -> Self {
        Self::new(&SuppressConfig::default())
    }
}

/// Per-layer filter: drops events whose recorded fields match a pattern.
impl<S: Subscriber> Filter<S> for SuppressFilter {
    fn enabled(&self, _meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        true
    }

    fn event_enabled(&self, event: &Event<'_>, _cx: &Context<'_, S>) -> bool {
        let mut text = EventText::default();
        event.record(&mut text);
        !self.matches(&text.0)
    }
}

/// Concatenated text of an event's fields.
#[derive(Default)]
struct EventText(String);

impl Visit for EventText {
    fn record_str(&mut self, _field: &Field, value: &str) {
        self.0.push_str(value);
        self.0.push('\n');
    }

    fn record_debug(&mut self, _field: &Field, value: &dyn fmt::Debug) {
        self.0.push_str(&format!("{:?}", value));
        self.0.push('\n');
    }
}
