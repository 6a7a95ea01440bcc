//! In-memory project and statistics stores for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::UserId;
use crate::project::domain::{Project, ProjectId};
use crate::project::ports::{
    FreelancerStatsStore, ProjectDetails, ProjectStore, ProjectStoreError, ProjectStoreResult,
    StatsStoreError, StatsStoreResult,
};
use crate::proposal::adapters::memory::InMemoryProposalStore;
use crate::proposal::ports::ProposalStore;

fn poisoned(err: impl std::fmt::Display) -> ProjectStoreError {
    ProjectStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory project store.
///
/// Shares a proposal store so detail lookups can attach live proposals.
#[derive(Clone)]
pub struct InMemoryProjectStore {
    state: Arc<RwLock<HashMap<ProjectId, Project>>>,
    proposals: Arc<InMemoryProposalStore>,
}

impl InMemoryProjectStore {
    /// Creates an empty project store over the given proposal store.
    #[must_use]
    pub fn new(proposals: Arc<InMemoryProposalStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            proposals,
        }
    }

    /// Returns `true` when the project exists but is soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_soft_deleted(&self, id: ProjectId) -> ProjectStoreResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).is_some_and(Project::is_deleted))
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn insert(&self, project: &Project) -> ProjectStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.contains_key(&project.id()) {
            return Err(ProjectStoreError::DuplicateProject(project.id()));
        }
        state.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectStoreResult<Project> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(stored) = state.get(&project.id()) else {
            return Err(ProjectStoreError::NotFound(project.id()));
        };
        if stored.version() != project.version() {
            return Err(ProjectStoreError::VersionConflict {
                project_id: project.id(),
                expected: project.version(),
                actual: stored.version(),
            });
        }
        let mut updated = project.clone();
        updated.bump_version();
        state.insert(updated.id(), updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectStoreResult<Option<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(&id).filter(|p| !p.is_deleted()).cloned())
    }

    async fn find_with_details(&self, id: ProjectId) -> ProjectStoreResult<Option<ProjectDetails>> {
        let Some(project) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let proposals = self
            .proposals
            .list_for_project(id)
            .await
            .map_err(ProjectStoreError::persistence)?;
        Ok(Some(ProjectDetails { project, proposals }))
    }

    async fn list(&self) -> ProjectStoreResult<Vec<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut projects: Vec<Project> = state
            .values()
            .filter(|p| !p.is_deleted())
            .cloned()
            .collect();
        projects.sort_by_key(Project::created_at);
        Ok(projects)
    }

    async fn soft_delete(&self, id: ProjectId) -> ProjectStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(project) = state.get_mut(&id) else {
            return Err(ProjectStoreError::NotFound(id));
        };
        project.mark_deleted();
        Ok(())
    }
}

/// Thread-safe in-memory completed-project counter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFreelancerStatsStore {
    counts: Arc<RwLock<HashMap<UserId, u64>>>,
}

impl InMemoryFreelancerStatsStore {
    /// Creates an empty counter store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the freelancer's completed-project count.
    ///
    /// # Errors
    ///
    /// Returns [`StatsStoreError::Persistence`] when the lock is poisoned.
    pub fn completed_count(&self, freelancer_id: UserId) -> StatsStoreResult<u64> {
        let counts = self
            .counts
            .read()
            .map_err(|err| StatsStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(counts.get(&freelancer_id).copied().unwrap_or(0))
    }
}

#[async_trait]
impl FreelancerStatsStore for InMemoryFreelancerStatsStore {
    async fn increment_completed(&self, freelancer_id: UserId) -> StatsStoreResult<u64> {
        let mut counts = self
            .counts
            .write()
            .map_err(|err| StatsStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let count = counts.entry(freelancer_id).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}
