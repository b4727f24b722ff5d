//! User-facing notifications (toasts).
//!
//! Sinks are fire-and-forget: callers hand over a [`Notification`] and never
//! inspect a response.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A short title plus a descriptive body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Presentation channel for notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification.
    fn notify(&self, notification: Notification);
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notifications received so far.
    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Take and clear the recorded notifications.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Sink that forwards notifications as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => tracing::warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            _ => tracing::info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.notify(Notification::success("Added to cart!", "Pure Spring (250ml) x1"));
        sink.notify(Notification::error("Wallet not connected", "Please connect your wallet first"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Added to cart!");
        assert_eq!(sink.last().unwrap().level, NotificationLevel::Error);
    }

    #[test]
    fn test_memory_sink_drain() {
        let sink = MemorySink::new();
        sink.notify(Notification::info("Hello", "World"));
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.entries().is_empty());
    }
}
