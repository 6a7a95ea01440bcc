//! Domain model for project lifecycle management.
//!
//! The project domain models posting, editing, assignment, completion,
//! and cancellation while keeping all infrastructure concerns outside of
//! the domain boundary.

mod error;
mod fields;
mod ids;
mod money;
mod project;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use fields::{ProjectDescription, ProjectTitle};
pub use ids::ProjectId;
pub use money::{Budget, NegativeBudget};
pub use project::{PersistedProjectData, Project, ProjectEdit, ProjectStatus};
