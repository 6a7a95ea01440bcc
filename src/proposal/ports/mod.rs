//! Port contracts for proposal lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by proposal
//! services.

pub mod store;

pub use store::{ProposalStore, ProposalStoreError, ProposalStoreResult};
