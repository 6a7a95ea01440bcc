//! Service layer for proposal submission, status updates, and withdrawal.

use crate::deadline::{DeadlineError, DeadlineNormalizer, require_future};
use crate::directory::{UserDirectory, UserDirectoryError, UserId, UserRole};
use crate::project::{
    Budget, NegativeBudget, ProjectId, ProjectStatus,
    ports::{ProjectStore, ProjectStoreError},
};
use crate::proposal::{
    domain::{
        CoverLetter, Proposal, ProposalDomainError, ProposalId, ProposalStatus, TransitionPolicy,
    },
    ports::{ProposalStore, ProposalStoreError},
};
use mockable::Clock;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for submitting a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProposalRequest {
    project_id: ProjectId,
    cover_letter: String,
    proposed_budget: Decimal,
    proposed_deadline: String,
}

impl CreateProposalRequest {
    /// Creates a request with required fields.
    ///
    /// `proposed_deadline` is a wall-clock string in the reference zone,
    /// `dd-MM-yyyy HH:mm`.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        cover_letter: impl Into<String>,
        proposed_budget: Decimal,
        proposed_deadline: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            cover_letter: cover_letter.into(),
            proposed_budget,
            proposed_deadline: proposed_deadline.into(),
        }
    }
}

/// Service-level errors for proposal lifecycle operations.
#[derive(Debug, Error)]
pub enum ProposalLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProposalDomainError),
    /// Deadline parsing or futurity validation failed.
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
    /// The proposed budget is invalid.
    #[error(transparent)]
    Budget(#[from] NegativeBudget),
    /// The targeted project is not accepting proposals.
    #[error("project {0} is not open for proposals")]
    ProjectNotOpen(ProjectId),
    /// The freelancer already has a blocking proposal on the project.
    #[error("freelancer {freelancer_id} already has an active proposal on project {project_id}")]
    DuplicateProposal {
        /// The targeted project.
        project_id: ProjectId,
        /// The submitting freelancer.
        freelancer_id: UserId,
    },
    /// Proposal store operation failed.
    #[error(transparent)]
    Store(#[from] ProposalStoreError),
    /// Project store operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectStoreError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for proposal lifecycle service operations.
pub type ProposalLifecycleResult<T> = Result<T, ProposalLifecycleError>;

/// Proposal lifecycle orchestration service.
#[derive(Clone)]
pub struct ProposalLifecycleService<P, R, D, C>
where
    P: ProposalStore,
    R: ProjectStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    proposals: Arc<P>,
    projects: Arc<R>,
    directory: Arc<D>,
    normalizer: DeadlineNormalizer,
    policy: TransitionPolicy,
    clock: Arc<C>,
}

impl<P, R, D, C> ProposalLifecycleService<P, R, D, C>
where
    P: ProposalStore,
    R: ProjectStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a proposal lifecycle service with the default transition
    /// policy.
    #[must_use]
    pub fn new(
        proposals: Arc<P>,
        projects: Arc<R>,
        directory: Arc<D>,
        normalizer: DeadlineNormalizer,
        clock: Arc<C>,
    ) -> Self {
        Self {
            proposals,
            projects,
            directory,
            normalizer,
            policy: TransitionPolicy::default(),
            clock,
        }
    }

    /// Replaces the transition policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Submits a proposal on an open project.
    ///
    /// Returns `Ok(None)` when the freelancer does not exist or does not
    /// hold the Freelancer role, or when the project does not exist —
    /// expected outcomes the caller maps to a not-found response.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalLifecycleError::ProjectNotOpen`] when the project
    /// is not accepting proposals, [`ProposalLifecycleError::DuplicateProposal`]
    /// when a blocking proposal for the pair exists, and deadline/budget
    /// validation errors before any write.
    pub async fn create(
        &self,
        freelancer_id: UserId,
        request: CreateProposalRequest,
    ) -> ProposalLifecycleResult<Option<Proposal>> {
        let Some(freelancer) = self.directory.find_by_id(freelancer_id).await? else {
            return Ok(None);
        };
        if !freelancer.has_role(UserRole::Freelancer) {
            return Ok(None);
        }

        let Some(project) = self.projects.find_by_id(request.project_id).await? else {
            return Ok(None);
        };
        if project.status() != ProjectStatus::Open {
            return Err(ProposalLifecycleError::ProjectNotOpen(request.project_id));
        }

        let existing = self
            .proposals
            .find_by_project_and_freelancer(request.project_id, freelancer_id)
            .await?;
        if existing.iter().any(|p| p.status().blocks_resubmission()) {
            return Err(ProposalLifecycleError::DuplicateProposal {
                project_id: request.project_id,
                freelancer_id,
            });
        }

        let deadline = self
            .normalizer
            .normalize(&request.proposed_deadline, "proposed_deadline")?;
        require_future(deadline, self.clock.utc())?;

        let cover_letter = CoverLetter::new(request.cover_letter)?;
        let budget = Budget::new(request.proposed_budget)?;

        let proposal = Proposal::new(
            request.project_id,
            freelancer_id,
            cover_letter,
            budget,
            deadline,
            &*self.clock,
        );
        self.proposals.insert(&proposal).await?;
        Ok(Some(proposal))
    }

    /// Requests a status transition on behalf of `actor_id`.
    ///
    /// Returns `Ok(None)` — a no-op, never an error — when the proposal is
    /// missing, already terminal, the status name does not parse, the
    /// actor is unknown, or the transition policy denies the actor's role
    /// the requested target.
    ///
    /// # Errors
    ///
    /// Returns store or directory errors; business outcomes are conveyed
    /// through the `Option`.
    pub async fn update_status(
        &self,
        proposal_id: ProposalId,
        new_status: &str,
        actor_id: UserId,
    ) -> ProposalLifecycleResult<Option<Proposal>> {
        let Some(mut proposal) = self.proposals.find_by_id(proposal_id).await? else {
            return Ok(None);
        };
        if proposal.is_final() {
            return Ok(None);
        }
        let Ok(target) = ProposalStatus::try_from(new_status) else {
            return Ok(None);
        };
        if !target.is_terminal() {
            return Ok(None);
        }
        let Some(actor) = self.directory.find_by_id(actor_id).await? else {
            return Ok(None);
        };
        if !self.policy.allows(actor.role, target) {
            return Ok(None);
        }

        proposal.finalize(target, &*self.clock)?;
        self.proposals.update(&proposal).await?;
        Ok(Some(proposal))
    }

    /// Soft-deletes a proposal, permitted only while Pending.
    ///
    /// Returns `Ok(false)` when the proposal is missing or no longer
    /// Pending.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalLifecycleError::Store`] when persistence fails.
    pub async fn delete(&self, proposal_id: ProposalId) -> ProposalLifecycleResult<bool> {
        let Some(proposal) = self.proposals.find_by_id(proposal_id).await? else {
            return Ok(false);
        };
        if proposal.status() != ProposalStatus::Pending {
            return Ok(false);
        }
        self.proposals.soft_delete(proposal_id).await?;
        Ok(true)
    }

    /// Retrieves a proposal by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalLifecycleError::Store`] when the lookup fails.
    pub async fn find(&self, proposal_id: ProposalId) -> ProposalLifecycleResult<Option<Proposal>> {
        Ok(self.proposals.find_by_id(proposal_id).await?)
    }

    /// Lists live proposals attached to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalLifecycleError::Store`] when the lookup fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> ProposalLifecycleResult<Vec<Proposal>> {
        Ok(self.proposals.list_for_project(project_id).await?)
    }

    /// Lists live proposals submitted by a freelancer.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalLifecycleError::Store`] when the lookup fails.
    pub async fn list_by_freelancer(
        &self,
        freelancer_id: UserId,
    ) -> ProposalLifecycleResult<Vec<Proposal>> {
        Ok(self.proposals.list_by_freelancer(freelancer_id).await?)
    }
}
