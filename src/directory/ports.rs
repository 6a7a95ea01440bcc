//! Port contract for user lookup.

use super::domain::{UserId, UserRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// Read-only user lookup contract.
///
/// Account management, authentication, and role assignment are all
/// concerns of the surrounding application; the core only asks "does this
/// user exist, and what role do they hold?".
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserRecord>>;
}

/// Errors returned by directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// Lookup-layer failure.
    #[error("directory error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a lookup-layer error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
