//! Project aggregate root and related lifecycle types.

use super::error::{ParseProjectStatusError, ProjectDomainError};
use super::fields::{ProjectDescription, ProjectTitle};
use super::ids::ProjectId;
use super::money::Budget;
use crate::directory::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Accepting proposals.
    Open,
    /// A freelancer has been chosen; work has not started.
    Assigned,
    /// The assigned freelancer is working.
    InProgress,
    /// Work finished and acknowledged by the client.
    Completed,
    /// Withdrawn by the client.
    Cancelled,
}

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns `true` when the state machine permits moving to `to`.
    ///
    /// Assigned may revert to Open: clearing the assignee re-opens the
    /// project for proposals.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Open, Self::Assigned | Self::Cancelled)
                | (
                    Self::Assigned,
                    Self::Open | Self::InProgress | Self::Completed | Self::Cancelled
                )
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns `true` when a project in this status carries an assignee.
    #[must_use]
    pub const fn carries_assignee(self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress | Self::Completed)
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field changes applied to an Open project.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectEdit {
    /// Replacement title, if any.
    pub title: Option<ProjectTitle>,
    /// Replacement description, if any.
    pub description: Option<ProjectDescription>,
    /// Replacement budget, if any.
    pub budget: Option<Budget>,
    /// Replacement deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
}

impl ProjectEdit {
    /// Creates an edit that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: ProjectTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: ProjectDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets a replacement budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets a replacement deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    client_id: UserId,
    title: ProjectTitle,
    description: ProjectDescription,
    budget: Budget,
    deadline: Option<DateTime<Utc>>,
    status: ProjectStatus,
    assigned_freelancer: Option<UserId>,
    completion_date: Option<DateTime<Utc>>,
    deleted: bool,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Client who posted the project.
    pub client_id: UserId,
    /// Persisted title.
    pub title: ProjectTitle,
    /// Persisted description.
    pub description: ProjectDescription,
    /// Persisted budget.
    pub budget: Budget,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Persisted assignee, if any.
    pub assigned_freelancer: Option<UserId>,
    /// Persisted completion timestamp, if any.
    pub completion_date: Option<DateTime<Utc>>,
    /// Persisted soft-delete flag.
    pub deleted: bool,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new Open project.
    #[must_use]
    pub fn new(
        client_id: UserId,
        title: ProjectTitle,
        description: ProjectDescription,
        budget: Budget,
        deadline: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            client_id,
            title,
            description,
            budget,
            deadline,
            status: ProjectStatus::Open,
            assigned_freelancer: None,
            completion_date: None,
            deleted: false,
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            title: data.title,
            description: data.description,
            budget: data.budget,
            deadline: data.deadline,
            status: data.status,
            assigned_freelancer: data.assigned_freelancer,
            completion_date: data.completion_date,
            deleted: data.deleted,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the posting client's identifier.
    #[must_use]
    pub const fn client_id(&self) -> UserId {
        self.client_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ProjectTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &ProjectDescription {
        &self.description
    }

    /// Returns the budget.
    #[must_use]
    pub const fn budget(&self) -> Budget {
        self.budget
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the assigned freelancer, if any.
    #[must_use]
    pub const fn assigned_freelancer(&self) -> Option<UserId> {
        self.assigned_freelancer
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completion_date(&self) -> Option<DateTime<Utc>> {
        self.completion_date
    }

    /// Returns `true` when the project is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the optimistic-concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies field changes, permitted only while Open.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::Deleted`] for soft-deleted projects
    /// and [`ProjectDomainError::NotEditable`] outside Open.
    pub fn apply_edit(
        &mut self,
        edit: ProjectEdit,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.guard_active()?;
        if self.status != ProjectStatus::Open {
            return Err(ProjectDomainError::NotEditable {
                project_id: self.id,
                status: self.status,
            });
        }
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(budget) = edit.budget {
            self.budget = budget;
        }
        if let Some(deadline) = edit.deadline {
            self.deadline = Some(deadline);
        }
        self.touch(clock);
        Ok(())
    }

    /// Assigns a freelancer, moving the project from Open to Assigned.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidTransition`] outside Open and
    /// [`ProjectDomainError::Deleted`] for soft-deleted projects.
    pub fn assign_to(
        &mut self,
        freelancer_id: UserId,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.transition_to(ProjectStatus::Assigned, clock)?;
        self.assigned_freelancer = Some(freelancer_id);
        Ok(())
    }

    /// Clears the assignee, reverting the project from Assigned to Open.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidTransition`] outside Assigned
    /// and [`ProjectDomainError::Deleted`] for soft-deleted projects.
    pub fn unassign(&mut self, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        self.transition_to(ProjectStatus::Open, clock)?;
        self.assigned_freelancer = None;
        Ok(())
    }

    /// Marks work as started, moving Assigned to InProgress.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidTransition`] outside Assigned
    /// and [`ProjectDomainError::Deleted`] for soft-deleted projects.
    pub fn start_work(&mut self, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        self.transition_to(ProjectStatus::InProgress, clock)
    }

    /// Completes the project, recording the completion instant.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidTransition`] unless the
    /// project is Assigned or InProgress, and
    /// [`ProjectDomainError::Deleted`] for soft-deleted projects.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        self.transition_to(ProjectStatus::Completed, clock)?;
        self.completion_date = Some(self.updated_at);
        Ok(())
    }

    /// Cancels the project, permitted while Open or Assigned.
    ///
    /// Clears the assignee so the carries-assignee invariant holds; the
    /// caller captures the assignee first when a notice is owed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidTransition`] outside
    /// Open/Assigned and [`ProjectDomainError::Deleted`] for soft-deleted
    /// projects.
    pub fn cancel(&mut self, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        self.transition_to(ProjectStatus::Cancelled, clock)?;
        self.assigned_freelancer = None;
        Ok(())
    }

    /// Marks the project as soft-deleted. Called by stores.
    pub const fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Advances the optimistic-concurrency version. Called by stores
    /// after a successful version-checked write.
    pub const fn bump_version(&mut self) {
        self.version += 1;
    }

    fn transition_to(
        &mut self,
        to: ProjectStatus,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.guard_active()?;
        if !self.status.can_transition_to(to) {
            return Err(ProjectDomainError::InvalidTransition {
                project_id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.touch(clock);
        Ok(())
    }

    const fn guard_active(&self) -> Result<(), ProjectDomainError> {
        if self.deleted {
            return Err(ProjectDomainError::Deleted(self.id));
        }
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
