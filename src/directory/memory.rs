//! In-memory user directory for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::{UserId, UserRecord, UserRole};
use super::ports::{UserDirectory, UserDirectoryError, UserDirectoryResult};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user with the given role, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn register(&self, role: UserRole) -> UserDirectoryResult<UserId> {
        let record = UserRecord::new(UserId::new(), role);
        let mut users = self
            .users
            .write()
            .map_err(|err| UserDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        users.insert(record.id, record);
        Ok(record.id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<UserRecord>> {
        let users = self
            .users
            .read()
            .map_err(|err| UserDirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(users.get(&id).copied())
    }
}
