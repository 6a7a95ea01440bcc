//! In-memory proposal store for tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::directory::UserId;
use crate::project::ProjectId;
use crate::proposal::domain::{Proposal, ProposalId};
use crate::proposal::ports::{ProposalStore, ProposalStoreError, ProposalStoreResult};

fn poisoned(err: impl std::fmt::Display) -> ProposalStoreError {
    ProposalStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory proposal store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProposalStore {
    state: Arc<RwLock<ProposalState>>,
}

#[derive(Debug, Default)]
struct ProposalState {
    proposals: HashMap<ProposalId, Proposal>,
    deleted: HashSet<ProposalId>,
}

impl ProposalState {
    fn live(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals
            .values()
            .filter(|p| !self.deleted.contains(&p.id()))
    }
}

impl InMemoryProposalStore {
    /// Creates an empty proposal store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the proposal exists but is soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalStoreError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_soft_deleted(&self, id: ProposalId) -> ProposalStoreResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.deleted.contains(&id))
    }
}

#[async_trait]
impl ProposalStore for InMemoryProposalStore {
    async fn insert(&self, proposal: &Proposal) -> ProposalStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.proposals.contains_key(&proposal.id()) {
            return Err(ProposalStoreError::DuplicateProposal(proposal.id()));
        }
        state.proposals.insert(proposal.id(), proposal.clone());
        Ok(())
    }

    async fn update(&self, proposal: &Proposal) -> ProposalStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.proposals.contains_key(&proposal.id()) {
            return Err(ProposalStoreError::NotFound(proposal.id()));
        }
        state.proposals.insert(proposal.id(), proposal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProposalId) -> ProposalStoreResult<Option<Proposal>> {
        let state = self.state.read().map_err(poisoned)?;
        if state.deleted.contains(&id) {
            return Ok(None);
        }
        Ok(state.proposals.get(&id).cloned())
    }

    async fn find_by_project_and_freelancer(
        &self,
        project_id: ProjectId,
        freelancer_id: UserId,
    ) -> ProposalStoreResult<Vec<Proposal>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .live()
            .filter(|p| p.project_id() == project_id && p.freelancer_id() == freelancer_id)
            .cloned()
            .collect())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> ProposalStoreResult<Vec<Proposal>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut proposals: Vec<Proposal> = state
            .live()
            .filter(|p| p.project_id() == project_id)
            .cloned()
            .collect();
        proposals.sort_by_key(Proposal::created_at);
        Ok(proposals)
    }

    async fn list_by_freelancer(
        &self,
        freelancer_id: UserId,
    ) -> ProposalStoreResult<Vec<Proposal>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut proposals: Vec<Proposal> = state
            .live()
            .filter(|p| p.freelancer_id() == freelancer_id)
            .cloned()
            .collect();
        proposals.sort_by_key(Proposal::created_at);
        Ok(proposals)
    }

    async fn soft_delete(&self, id: ProposalId) -> ProposalStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.proposals.contains_key(&id) {
            return Err(ProposalStoreError::NotFound(id));
        }
        state.deleted.insert(id);
        Ok(())
    }
}
