//! Error types for project domain validation and parsing.

use super::ids::ProjectId;
use super::project::ProjectStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating domain project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The title is empty after trimming.
    #[error("project title must not be empty")]
    EmptyTitle,

    /// The title exceeds the persisted column width.
    #[error("project title exceeds {limit} characters (got {length})")]
    TitleTooLong {
        /// Maximum accepted length.
        limit: usize,
        /// Supplied length.
        length: usize,
    },

    /// The description is empty after trimming.
    #[error("project description must not be empty")]
    EmptyDescription,

    /// The requested status transition is not permitted.
    #[error("project {project_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The project identifier.
        project_id: ProjectId,
        /// Status before the attempt.
        from: ProjectStatus,
        /// The rejected target status.
        to: ProjectStatus,
    },

    /// The project may only be edited while Open.
    #[error("project {project_id} is {status} and no longer editable")]
    NotEditable {
        /// The project identifier.
        project_id: ProjectId,
        /// Status at the time of the attempt.
        status: ProjectStatus,
    },

    /// Soft-deleted projects accept no further mutation.
    #[error("project {0} is deleted")]
    Deleted(ProjectId),
}

/// Error returned while parsing project statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
