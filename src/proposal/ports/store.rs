//! Repository port for proposal persistence and lookup.

use crate::directory::UserId;
use crate::project::ProjectId;
use crate::proposal::domain::{Proposal, ProposalId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for proposal store operations.
pub type ProposalStoreResult<T> = Result<T, ProposalStoreError>;

/// Proposal persistence contract.
///
/// Soft-deleted proposals are invisible to every lookup; propagating the
/// soft-delete flag is the implementation's concern.
#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Stores a new proposal.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalStoreError::DuplicateProposal`] when the proposal
    /// ID already exists.
    async fn insert(&self, proposal: &Proposal) -> ProposalStoreResult<()>;

    /// Persists changes to an existing proposal (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`ProposalStoreError::NotFound`] when the proposal does not
    /// exist.
    async fn update(&self, proposal: &Proposal) -> ProposalStoreResult<()>;

    /// Finds a proposal by identifier.
    ///
    /// Returns `None` when the proposal does not exist or is soft-deleted.
    async fn find_by_id(&self, id: ProposalId) -> ProposalStoreResult<Option<Proposal>>;

    /// Returns every live proposal for the (project, freelancer) pair.
    async fn find_by_project_and_freelancer(
        &self,
        project_id: ProjectId,
        freelancer_id: UserId,
    ) -> ProposalStoreResult<Vec<Proposal>>;

    /// Returns every live proposal attached to the project.
    async fn list_for_project(&self, project_id: ProjectId) -> ProposalStoreResult<Vec<Proposal>>;

    /// Returns every live proposal submitted by the freelancer.
    async fn list_by_freelancer(&self, freelancer_id: UserId)
    -> ProposalStoreResult<Vec<Proposal>>;

    /// Marks a proposal as soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalStoreError::NotFound`] when the proposal does not
    /// exist.
    async fn soft_delete(&self, id: ProposalId) -> ProposalStoreResult<()>;
}

/// Errors returned by proposal store implementations.
#[derive(Debug, Clone, Error)]
pub enum ProposalStoreError {
    /// A proposal with the same identifier already exists.
    #[error("duplicate proposal identifier: {0}")]
    DuplicateProposal(ProposalId),

    /// The proposal was not found.
    #[error("proposal not found: {0}")]
    NotFound(ProposalId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProposalStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
