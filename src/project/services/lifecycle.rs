//! Service layer for posting, editing, assigning, and closing projects.

use crate::deadline::{DeadlineError, DeadlineNormalizer, require_future};
use crate::directory::{UserDirectory, UserDirectoryError, UserId, UserRole};
use crate::notification::{Notice, NotificationSink};
use crate::project::{
    domain::{
        Budget, NegativeBudget, Project, ProjectDescription, ProjectDomainError, ProjectEdit,
        ProjectId, ProjectStatus, ProjectTitle,
    },
    ports::{
        FreelancerStatsStore, ProjectDetails, ProjectStore, ProjectStoreError, StatsStoreError,
    },
    services::assignment::{AssignmentCoordinator, CascadeReport},
};
use crate::proposal::{
    domain::ProposalStatus,
    ports::{ProposalStore, ProposalStoreError},
};
use crate::skill::{
    ProjectSkillStore, SkillResolveError, SkillResolver, SkillSetChange, SkillStore,
};
use mockable::Clock;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for posting a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    title: String,
    description: String,
    budget: Decimal,
    deadline: Option<String>,
    skills: Vec<String>,
}

impl CreateProjectRequest {
    /// Creates a request with required fields and no deadline or skills.
    ///
    /// A deadline, when set, is a wall-clock string in the reference
    /// zone, `dd-MM-yyyy HH:mm`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        budget: Decimal,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            budget,
            deadline: None,
            skills: Vec::new(),
        }
    }

    /// Sets the deadline string.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Sets the required skill names.
    #[must_use]
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }
}

/// How an update treats the project's assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssigneePatch {
    /// Leave the assignee untouched.
    #[default]
    Keep,
    /// Assign the given freelancer, moving Open to Assigned.
    Assign(UserId),
    /// Clear the assignee, moving Assigned back to Open.
    Clear,
}

/// Request payload for updating a project.
///
/// `expected_version` is the version the caller read; the update is
/// rejected when the aggregate has moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    expected_version: u64,
    title: Option<String>,
    description: Option<String>,
    budget: Option<Decimal>,
    deadline: Option<String>,
    skills: Option<Vec<String>>,
    assignee: AssigneePatch,
}

impl UpdateProjectRequest {
    /// Creates an empty update against the given version.
    #[must_use]
    pub const fn new(expected_version: u64) -> Self {
        Self {
            expected_version,
            title: None,
            description: None,
            budget: None,
            deadline: None,
            skills: None,
            assignee: AssigneePatch::Keep,
        }
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Decimal) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets a replacement deadline string.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }

    /// Sets the desired skill set; the project's joins are reconciled to
    /// exactly this set.
    #[must_use]
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = Some(skills);
        self
    }

    /// Sets the assignee patch.
    #[must_use]
    pub const fn with_assignee(mut self, patch: AssigneePatch) -> Self {
        self.assignee = patch;
        self
    }

    fn is_field_edit(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.budget.is_some()
            || self.deadline.is_some()
    }
}

/// A persisted project paired with its assignment cascade report.
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    /// The project after assignment.
    pub project: Project,
    /// What the cascade accomplished.
    pub report: CascadeReport,
}

/// Service-level errors for project lifecycle operations.
#[derive(Debug, Error)]
pub enum ProjectLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// Deadline parsing or futurity validation failed.
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
    /// The budget is invalid.
    #[error(transparent)]
    Budget(#[from] NegativeBudget),
    /// Skill resolution or reconciliation failed.
    #[error(transparent)]
    Skills(#[from] SkillResolveError),
    /// Project store operation failed.
    #[error(transparent)]
    Store(#[from] ProjectStoreError),
    /// Proposal store operation failed.
    #[error(transparent)]
    Proposals(#[from] ProposalStoreError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// The completed-project counter could not be updated.
    #[error(transparent)]
    Stats(#[from] StatsStoreError),
}

/// Result type for project lifecycle service operations.
pub type ProjectLifecycleResult<T> = Result<T, ProjectLifecycleError>;

/// Project lifecycle orchestration service.
pub struct ProjectLifecycleService<PS, PR, D, SS, JS, ST, NS, C>
where
    PS: ProjectStore,
    PR: ProposalStore,
    D: UserDirectory,
    SS: SkillStore,
    JS: ProjectSkillStore,
    ST: FreelancerStatsStore,
    NS: NotificationSink,
    C: Clock + Send + Sync,
{
    projects: Arc<PS>,
    directory: Arc<D>,
    skills: SkillResolver<SS, JS>,
    coordinator: AssignmentCoordinator<PR, NS, C>,
    stats: Arc<ST>,
    sink: Arc<NS>,
    normalizer: DeadlineNormalizer,
    clock: Arc<C>,
}

impl<PS, PR, D, SS, JS, ST, NS, C> ProjectLifecycleService<PS, PR, D, SS, JS, ST, NS, C>
where
    PS: ProjectStore,
    PR: ProposalStore,
    D: UserDirectory,
    SS: SkillStore,
    JS: ProjectSkillStore,
    ST: FreelancerStatsStore,
    NS: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a project lifecycle service.
    #[must_use]
    #[expect(clippy::too_many_arguments, reason = "wiring point for every port")]
    pub fn new(
        projects: Arc<PS>,
        proposals: Arc<PR>,
        directory: Arc<D>,
        skills: SkillResolver<SS, JS>,
        stats: Arc<ST>,
        sink: Arc<NS>,
        normalizer: DeadlineNormalizer,
        clock: Arc<C>,
    ) -> Self {
        let coordinator =
            AssignmentCoordinator::new(proposals, Arc::clone(&sink), Arc::clone(&clock));
        Self {
            projects,
            directory,
            skills,
            coordinator,
            stats,
            sink,
            normalizer,
            clock,
        }
    }

    /// Posts a new project on behalf of `client_id`.
    ///
    /// Returns `Ok(None)` when the client does not exist or does not hold
    /// the Client role.
    ///
    /// # Errors
    ///
    /// Returns validation errors for the title, description, budget, and
    /// deadline before any write, and store errors afterwards.
    pub async fn create(
        &self,
        client_id: UserId,
        request: CreateProjectRequest,
    ) -> ProjectLifecycleResult<Option<Project>> {
        let Some(client) = self.directory.find_by_id(client_id).await? else {
            return Ok(None);
        };
        if !client.has_role(UserRole::Client) {
            return Ok(None);
        }

        let title = ProjectTitle::new(request.title)?;
        let description = ProjectDescription::new(request.description)?;
        let budget = Budget::new(request.budget)?;
        let deadline = match request.deadline {
            Some(raw) => {
                let deadline = self.normalizer.normalize(&raw, "deadline")?;
                require_future(deadline, self.clock.utc())?;
                Some(deadline)
            }
            None => None,
        };

        let project = Project::new(client_id, title, description, budget, deadline, &*self.clock);
        self.projects.insert(&project).await?;
        if !request.skills.is_empty() {
            self.skills
                .diff_and_apply(project.id(), &request.skills)
                .await?;
        }
        Ok(Some(project))
    }

    /// Applies an update to a project, version-checked.
    ///
    /// Field and skill edits require the project to be Open; the assignee
    /// patch drives the Open/Assigned transitions, and clearing an already
    /// empty assignee is a no-op. Returns `Ok(None)` when the project is
    /// missing, or when an assignee patch names a user who does not exist
    /// or does not hold the Freelancer role.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectStoreError::VersionConflict`] (wrapped) when the
    /// caller's version is stale, and domain errors for edits outside
    /// Open or transitions the state machine forbids.
    pub async fn update(
        &self,
        project_id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectLifecycleResult<Option<Project>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        if project.version() != request.expected_version {
            return Err(ProjectStoreError::VersionConflict {
                project_id,
                expected: request.expected_version,
                actual: project.version(),
            }
            .into());
        }

        if request.skills.is_some() && project.status() != ProjectStatus::Open {
            return Err(ProjectDomainError::NotEditable {
                project_id,
                status: project.status(),
            }
            .into());
        }

        if request.is_field_edit() {
            let mut edit = ProjectEdit::new();
            if let Some(title) = request.title {
                edit = edit.with_title(ProjectTitle::new(title)?);
            }
            if let Some(description) = request.description {
                edit = edit.with_description(ProjectDescription::new(description)?);
            }
            if let Some(budget) = request.budget {
                edit = edit.with_budget(Budget::new(budget)?);
            }
            if let Some(raw) = request.deadline {
                let deadline = self.normalizer.normalize(&raw, "deadline")?;
                require_future(deadline, self.clock.utc())?;
                edit = edit.with_deadline(deadline);
            }
            project.apply_edit(edit, &*self.clock)?;
        }

        match request.assignee {
            AssigneePatch::Keep => {}
            AssigneePatch::Assign(freelancer_id) => {
                let Some(freelancer) = self.directory.find_by_id(freelancer_id).await? else {
                    return Ok(None);
                };
                if !freelancer.has_role(UserRole::Freelancer) {
                    return Ok(None);
                }
                project.assign_to(freelancer_id, &*self.clock)?;
            }
            AssigneePatch::Clear => {
                if project.assigned_freelancer().is_some() {
                    project.unassign(&*self.clock)?;
                }
            }
        }

        if let Some(skills) = request.skills {
            self.reconcile_skills(project_id, &skills).await?;
        }

        let project = self.projects.update(&project).await?;
        Ok(Some(project))
    }

    /// Awards the project to the given freelancer and runs the
    /// assignment cascade.
    ///
    /// Assignment requires an active application: returns `Ok(None)` when
    /// the project is missing, the user is not a known freelancer, or the
    /// freelancer holds no Pending proposal on it. The project assignment
    /// is persisted before the cascade;
    /// cascade failures land in the returned report rather than aborting
    /// the award.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the project is not Open, and a wrapped
    /// [`ProjectStoreError::VersionConflict`] when a concurrent assign
    /// got there first.
    pub async fn assign(
        &self,
        project_id: ProjectId,
        freelancer_id: UserId,
    ) -> ProjectLifecycleResult<Option<AssignmentOutcome>> {
        let Some(freelancer) = self.directory.find_by_id(freelancer_id).await? else {
            return Ok(None);
        };
        if !freelancer.has_role(UserRole::Freelancer) {
            return Ok(None);
        }
        let Some(details) = self.projects.find_with_details(project_id).await? else {
            return Ok(None);
        };
        let ProjectDetails {
            mut project,
            proposals,
        } = details;
        let Some(winner) = proposals
            .iter()
            .find(|p| p.freelancer_id() == freelancer_id && p.status() == ProposalStatus::Pending)
            .cloned()
        else {
            return Ok(None);
        };

        project.assign_to(winner.freelancer_id(), &*self.clock)?;
        let project = self.projects.update(&project).await?;
        let report = self.coordinator.run(&project, winner, proposals).await;
        Ok(Some(AssignmentOutcome { project, report }))
    }

    /// Marks the assigned freelancer as having started work.
    ///
    /// Returns `Ok(None)` when the project is missing.
    ///
    /// # Errors
    ///
    /// Returns a domain error unless the project is Assigned.
    pub async fn start_work(
        &self,
        project_id: ProjectId,
    ) -> ProjectLifecycleResult<Option<Project>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        project.start_work(&*self.clock)?;
        let project = self.projects.update(&project).await?;
        Ok(Some(project))
    }

    /// Completes the project, credits the assignee's completed-project
    /// count, and notifies them.
    ///
    /// Returns `Ok(None)` when the project is missing. A failed notice is
    /// logged and swallowed; a failed counter update propagates.
    ///
    /// # Errors
    ///
    /// Returns a domain error unless the project is Assigned or
    /// InProgress, and [`ProjectLifecycleError::Stats`] when the counter
    /// cannot be updated.
    pub async fn mark_completed(
        &self,
        project_id: ProjectId,
    ) -> ProjectLifecycleResult<Option<Project>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        project.complete(&*self.clock)?;
        let project = self.projects.update(&project).await?;

        if let Some(freelancer_id) = project.assigned_freelancer() {
            self.stats.increment_completed(freelancer_id).await?;
            self.deliver(Notice::project_completed(
                freelancer_id,
                project.title().as_str(),
            ))
            .await;
        }
        Ok(Some(project))
    }

    /// Cancels the project and notifies the assignee it had, if any.
    ///
    /// Returns `Ok(None)` when the project is missing. A failed notice is
    /// logged and swallowed.
    ///
    /// # Errors
    ///
    /// Returns a domain error unless the project is Open or Assigned.
    pub async fn cancel(&self, project_id: ProjectId) -> ProjectLifecycleResult<Option<Project>> {
        let Some(mut project) = self.projects.find_by_id(project_id).await? else {
            return Ok(None);
        };
        let former_assignee = project.assigned_freelancer();
        project.cancel(&*self.clock)?;
        let project = self.projects.update(&project).await?;

        if let Some(freelancer_id) = former_assignee {
            self.deliver(Notice::project_cancelled(
                freelancer_id,
                project.title().as_str(),
            ))
            .await;
        }
        Ok(Some(project))
    }

    /// Soft-deletes a project, permitted only while Open.
    ///
    /// Returns `Ok(false)` when the project is missing or no longer Open.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Store`] when persistence fails.
    pub async fn delete(&self, project_id: ProjectId) -> ProjectLifecycleResult<bool> {
        let Some(project) = self.projects.find_by_id(project_id).await? else {
            return Ok(false);
        };
        if project.status() != ProjectStatus::Open {
            return Ok(false);
        }
        self.projects.soft_delete(project_id).await?;
        Ok(true)
    }

    /// Retrieves a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Store`] when the lookup fails.
    pub async fn find(&self, project_id: ProjectId) -> ProjectLifecycleResult<Option<Project>> {
        Ok(self.projects.find_by_id(project_id).await?)
    }

    /// Retrieves a project together with its live proposals.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Store`] when the lookup fails.
    pub async fn find_details(
        &self,
        project_id: ProjectId,
    ) -> ProjectLifecycleResult<Option<ProjectDetails>> {
        Ok(self.projects.find_with_details(project_id).await?)
    }

    /// Lists every live project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Store`] when the lookup fails.
    pub async fn list(&self) -> ProjectLifecycleResult<Vec<Project>> {
        Ok(self.projects.list().await?)
    }

    async fn reconcile_skills(
        &self,
        project_id: ProjectId,
        desired: &[String],
    ) -> ProjectLifecycleResult<SkillSetChange> {
        Ok(self.skills.diff_and_apply(project_id, desired).await?)
    }

    async fn deliver(&self, notice: Notice) {
        if let Err(err) = self.sink.notify(&notice).await {
            warn!(
                receiver = %notice.receiver,
                category = %notice.category,
                error = %err,
                "notice delivery failed",
            );
        }
    }
}
