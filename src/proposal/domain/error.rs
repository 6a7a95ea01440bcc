//! Error types for proposal domain validation and parsing.

use super::proposal::{ProposalId, ProposalStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain proposal values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProposalDomainError {
    /// The cover letter is empty after trimming.
    #[error("cover letter must not be empty")]
    EmptyCoverLetter,

    /// The cover letter exceeds the persisted column width.
    #[error("cover letter exceeds {limit} characters (got {length})")]
    CoverLetterTooLong {
        /// Maximum accepted length.
        limit: usize,
        /// Supplied length.
        length: usize,
    },

    /// The proposal already reached a terminal status.
    #[error("proposal {id} is already {status} and cannot change")]
    AlreadyFinal {
        /// The proposal identifier.
        id: ProposalId,
        /// The terminal status it holds.
        status: ProposalStatus,
    },

    /// Pending is not a valid finalisation target.
    #[error("proposal {0} cannot be re-opened to pending")]
    CannotReopen(ProposalId),
}

/// Error returned while parsing proposal statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown proposal status: {0}")]
pub struct ParseProposalStatusError(pub String);
