//! Domain model for proposal lifecycle management.
//!
//! The proposal domain models application submission, terminal status
//! transitions, and the role-gated transition policy, keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod policy;
mod proposal;

pub use error::{ParseProposalStatusError, ProposalDomainError};
pub use policy::TransitionPolicy;
pub use proposal::{
    CoverLetter, PersistedProposalData, Proposal, ProposalId, ProposalStatus,
};
