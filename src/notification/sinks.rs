//! Notification sink port and in-memory sinks for tests.

use super::notice::Notice;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Result type for sink operations.
pub type NotificationResult = Result<(), NotificationError>;

/// Fire-and-forget notice delivery contract.
///
/// The core never consumes a return value beyond logging failures; a
/// rejected notice must not abort the transition that produced it.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Hands a composed notice to the delivery layer.
    async fn notify(&self, notice: &Notice) -> NotificationResult;
}

/// Errors returned by sink implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// Delivery-layer failure.
    #[error("notification delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a delivery-layer error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}

/// Sink that records every notice it receives, for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    sent: Arc<RwLock<Vec<Notice>>>,
}

impl RecordingNotificationSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every notice received so far.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Delivery`] when the lock is poisoned.
    pub fn sent(&self) -> Result<Vec<Notice>, NotificationError> {
        let sent = self
            .sent
            .read()
            .map_err(|err| NotificationError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(sent.clone())
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(&self, notice: &Notice) -> NotificationResult {
        let mut sent = self
            .sent
            .write()
            .map_err(|err| NotificationError::delivery(std::io::Error::other(err.to_string())))?;
        sent.push(notice.clone());
        Ok(())
    }
}

/// Sink that rejects every notice, for partial-failure tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotificationSink;

impl FailingNotificationSink {
    /// Creates a failing sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for FailingNotificationSink {
    async fn notify(&self, _notice: &Notice) -> NotificationResult {
        Err(NotificationError::delivery(std::io::Error::other(
            "sink unavailable",
        )))
    }
}
