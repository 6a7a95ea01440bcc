//! Project lifecycle management and the assignment cascade.
//!
//! A project is a unit of work posted by a client, matched to a
//! freelancer through proposals. This module owns the project status
//! state machine (Open, Assigned, InProgress, Completed, Cancelled), the
//! optimistic-concurrency version carried by every aggregate, and the
//! Assignment Coordinator that rejects competing proposals when one
//! freelancer wins. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

pub use domain::{
    Budget, NegativeBudget, ParseProjectStatusError, PersistedProjectData, Project,
    ProjectDescription, ProjectDomainError, ProjectEdit, ProjectId, ProjectStatus, ProjectTitle,
};

#[cfg(test)]
mod tests;
