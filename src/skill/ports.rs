//! Port contracts for skill persistence and project skill joins.

use super::domain::{Skill, SkillId, SkillName};
use crate::project::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for skill store operations.
pub type SkillStoreResult<T> = Result<T, SkillStoreError>;

/// Canonical skill vocabulary persistence contract.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Finds a skill by case-insensitive exact name.
    ///
    /// Returns `None` when no skill carries the name.
    async fn find_by_name(&self, name: &SkillName) -> SkillStoreResult<Option<Skill>>;

    /// Stores a new canonical skill.
    ///
    /// # Errors
    ///
    /// Returns [`SkillStoreError::DuplicateName`] when the name is already
    /// taken (case-insensitively).
    async fn insert(&self, skill: &Skill) -> SkillStoreResult<()>;
}

/// Project-to-skill join persistence contract.
///
/// The join set is owned by the project side; soft-delete bookkeeping on
/// removed joins is the implementation's concern.
#[async_trait]
pub trait ProjectSkillStore: Send + Sync {
    /// Returns the skill identifiers currently joined to the project.
    async fn list_for_project(&self, project_id: ProjectId) -> SkillStoreResult<Vec<SkillId>>;

    /// Adds a join row for the (project, skill) pair.
    async fn add(&self, project_id: ProjectId, skill_id: SkillId) -> SkillStoreResult<()>;

    /// Removes the join row for the (project, skill) pair.
    async fn remove(&self, project_id: ProjectId, skill_id: SkillId) -> SkillStoreResult<()>;
}

/// Errors returned by skill store implementations.
#[derive(Debug, Clone, Error)]
pub enum SkillStoreError {
    /// A skill with the same case-folded name already exists.
    #[error("duplicate skill name: {0}")]
    DuplicateName(SkillName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SkillStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
