//! Notice categories and message composition.

use crate::directory::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag attached to every notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeCategory {
    /// A freelancer submitted a proposal on the receiver's project.
    NewProposal,
    /// The receiver's proposal was accepted.
    ProposalAccepted,
    /// The receiver's proposal was rejected.
    ProposalRejected,
    /// A project the receiver worked on was completed.
    ProjectCompleted,
    /// A project the receiver worked on was cancelled.
    ProjectCancelled,
    /// System announcements and anything uncategorised.
    General,
}

impl NoticeCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewProposal => "new_proposal",
            Self::ProposalAccepted => "proposal_accepted",
            Self::ProposalRejected => "proposal_rejected",
            Self::ProjectCompleted => "project_completed",
            Self::ProjectCancelled => "project_cancelled",
            Self::General => "general",
        }
    }
}

impl fmt::Display for NoticeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A composed, user-visible notice awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// The user the notice addresses.
    pub receiver: UserId,
    /// Category tag for client-side grouping.
    pub category: NoticeCategory,
    /// The composed message body.
    pub message: String,
}

impl Notice {
    /// Creates a notice from its parts.
    #[must_use]
    pub fn new(receiver: UserId, category: NoticeCategory, message: impl Into<String>) -> Self {
        Self {
            receiver,
            category,
            message: message.into(),
        }
    }

    /// Composes the notice sent to a losing proposer when a project is
    /// awarded to someone else.
    #[must_use]
    pub fn awarded_elsewhere(receiver: UserId, project_title: &str) -> Self {
        Self::new(
            receiver,
            NoticeCategory::ProposalRejected,
            format!("'{project_title}' has been assigned to a different freelancer. Better luck next time!"),
        )
    }

    /// Composes the notice sent to the winning proposer.
    #[must_use]
    pub fn proposal_accepted(receiver: UserId, project_title: &str) -> Self {
        Self::new(
            receiver,
            NoticeCategory::ProposalAccepted,
            format!("Your proposal for '{project_title}' has been accepted."),
        )
    }

    /// Composes the notice sent to the assignee when a project completes.
    #[must_use]
    pub fn project_completed(receiver: UserId, project_title: &str) -> Self {
        Self::new(
            receiver,
            NoticeCategory::ProjectCompleted,
            format!("'{project_title}' has been marked as completed."),
        )
    }

    /// Composes the notice sent to the assignee when the client cancels a
    /// project.
    #[must_use]
    pub fn project_cancelled(receiver: UserId, project_title: &str) -> Self {
        Self::new(
            receiver,
            NoticeCategory::ProjectCancelled,
            format!("'{project_title}' has been cancelled by the client."),
        )
    }
}
