//! Proposal aggregate root and related lifecycle types.

use super::error::{ParseProposalStatusError, ProposalDomainError};
use crate::directory::UserId;
use crate::project::{Budget, ProjectId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Longest accepted cover letter, matching the persisted column width.
const MAX_COVER_LETTER_LENGTH: usize = 2000;

/// Unique identifier for a proposal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(Uuid);

impl ProposalId {
    /// Creates a new random proposal identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a proposal identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ProposalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Proposal lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Awaiting a decision.
    Pending,
    /// Chosen for the project; terminal.
    Accepted,
    /// Passed over; terminal.
    Rejected,
    /// Retracted by the freelancer; terminal.
    Withdrawn,
}

impl ProposalStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns `true` when no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns `true` when a proposal in this status blocks the same
    /// freelancer from submitting another proposal on the same project.
    ///
    /// Pending and Accepted block; Rejected and Withdrawn free the pair.
    #[must_use]
    pub const fn blocks_resubmission(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

impl TryFrom<&str> for ProposalStatus {
    type Error = ParseProposalStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(ParseProposalStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated cover letter text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverLetter(String);

impl CoverLetter {
    /// Creates a validated cover letter.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalDomainError::EmptyCoverLetter`] when the trimmed
    /// value is empty, or [`ProposalDomainError::CoverLetterTooLong`] when
    /// it exceeds the column width.
    pub fn new(value: impl Into<String>) -> Result<Self, ProposalDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProposalDomainError::EmptyCoverLetter);
        }
        let length = trimmed.chars().count();
        if length > MAX_COVER_LETTER_LENGTH {
            return Err(ProposalDomainError::CoverLetterTooLong {
                limit: MAX_COVER_LETTER_LENGTH,
                length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the cover letter text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CoverLetter {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Proposal aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    id: ProposalId,
    project_id: ProjectId,
    freelancer_id: UserId,
    cover_letter: CoverLetter,
    proposed_budget: Budget,
    proposed_deadline: DateTime<Utc>,
    status: ProposalStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted proposal aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProposalData {
    /// Persisted proposal identifier.
    pub id: ProposalId,
    /// Project the proposal targets.
    pub project_id: ProjectId,
    /// Freelancer who submitted the proposal.
    pub freelancer_id: UserId,
    /// Persisted cover letter.
    pub cover_letter: CoverLetter,
    /// Persisted proposed budget.
    pub proposed_budget: Budget,
    /// Persisted proposed deadline.
    pub proposed_deadline: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: ProposalStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Proposal {
    /// Creates a new pending proposal.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        freelancer_id: UserId,
        cover_letter: CoverLetter,
        proposed_budget: Budget,
        proposed_deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProposalId::new(),
            project_id,
            freelancer_id,
            cover_letter,
            proposed_budget,
            proposed_deadline,
            status: ProposalStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a proposal from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProposalData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            freelancer_id: data.freelancer_id,
            cover_letter: data.cover_letter,
            proposed_budget: data.proposed_budget,
            proposed_deadline: data.proposed_deadline,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the proposal identifier.
    #[must_use]
    pub const fn id(&self) -> ProposalId {
        self.id
    }

    /// Returns the targeted project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the submitting freelancer's identifier.
    #[must_use]
    pub const fn freelancer_id(&self) -> UserId {
        self.freelancer_id
    }

    /// Returns the cover letter.
    #[must_use]
    pub const fn cover_letter(&self) -> &CoverLetter {
        &self.cover_letter
    }

    /// Returns the proposed budget.
    #[must_use]
    pub const fn proposed_budget(&self) -> Budget {
        self.proposed_budget
    }

    /// Returns the proposed deadline.
    #[must_use]
    pub const fn proposed_deadline(&self) -> DateTime<Utc> {
        self.proposed_deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProposalStatus {
        self.status
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

    /// Returns `true` when the proposal reached a terminal status.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves the proposal into a terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`ProposalDomainError::AlreadyFinal`] when the proposal is
    /// already terminal, or [`ProposalDomainError::CannotReopen`] when the
    /// target is [`ProposalStatus::Pending`].
    pub fn finalize(
        &mut self,
        target: ProposalStatus,
        clock: &impl Clock,
    ) -> Result<(), ProposalDomainError> {
        if self.status.is_terminal() {
            return Err(ProposalDomainError::AlreadyFinal {
                id: self.id,
                status: self.status,
            });
        }
        if !target.is_terminal() {
            return Err(ProposalDomainError::CannotReopen(self.id));
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
