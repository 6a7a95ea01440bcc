//! Port for the freelancer completed-project counter.

use crate::directory::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for statistics store operations.
pub type StatsStoreResult<T> = Result<T, StatsStoreError>;

/// Tracks how many projects each freelancer has completed.
#[async_trait]
pub trait FreelancerStatsStore: Send + Sync {
    /// Increments the freelancer's completed-project count, returning the
    /// new total.
    ///
    /// # Errors
    ///
    /// Returns [`StatsStoreError::Persistence`] when the counter cannot
    /// be updated.
    async fn increment_completed(&self, freelancer_id: UserId) -> StatsStoreResult<u64>;
}

/// Errors returned by statistics store implementations.
#[derive(Debug, Clone, Error)]
pub enum StatsStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatsStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
