//! Application services for proposal lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateProposalRequest, ProposalLifecycleError, ProposalLifecycleResult,
    ProposalLifecycleService,
};
