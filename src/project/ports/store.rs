//! Repository port for project persistence and lookup.

use crate::project::domain::{Project, ProjectId};
use crate::proposal::domain::Proposal;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project store operations.
pub type ProjectStoreResult<T> = Result<T, ProjectStoreError>;

/// A project together with its live proposals.
#[derive(Debug, Clone)]
pub struct ProjectDetails {
    /// The project aggregate.
    pub project: Project,
    /// Live proposals attached to the project, oldest first.
    pub proposals: Vec<Proposal>,
}

/// Project persistence contract.
///
/// Soft-deleted projects are invisible to every lookup. Updates are
/// version-checked: the store compares the aggregate's version against
/// the persisted one and rejects stale writers.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::DuplicateProject`] when the project ID
    /// already exists.
    async fn insert(&self, project: &Project) -> ProjectStoreResult<()>;

    /// Persists changes to an existing project, enforcing the optimistic
    /// version check. Returns the aggregate with its version advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::NotFound`] when the project does not
    /// exist and [`ProjectStoreError::VersionConflict`] when another
    /// writer got there first.
    async fn update(&self, project: &Project) -> ProjectStoreResult<Project>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist or is soft-deleted.
    async fn find_by_id(&self, id: ProjectId) -> ProjectStoreResult<Option<Project>>;

    /// Finds a project together with its live proposals.
    ///
    /// Returns `None` when the project does not exist or is soft-deleted.
    async fn find_with_details(&self, id: ProjectId) -> ProjectStoreResult<Option<ProjectDetails>>;

    /// Returns every live project, oldest first.
    async fn list(&self) -> ProjectStoreResult<Vec<Project>>;

    /// Marks a project as soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::NotFound`] when the project does not
    /// exist.
    async fn soft_delete(&self, id: ProjectId) -> ProjectStoreResult<()>;
}

/// Errors returned by project store implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectStoreError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Another writer updated the project first.
    #[error("version conflict on project {project_id}: expected {expected}, found {actual}")]
    VersionConflict {
        /// The contested project.
        project_id: ProjectId,
        /// Version the writer read.
        expected: u64,
        /// Version found in the store.
        actual: u64,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
