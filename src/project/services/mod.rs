//! Orchestration services for the project lifecycle.

mod assignment;
mod lifecycle;

pub use assignment::{AssignmentCoordinator, CascadeEffect, CascadeFailure, CascadeReport};
pub use lifecycle::{
    AssigneePatch, AssignmentOutcome, CreateProjectRequest, ProjectLifecycleError,
    ProjectLifecycleResult, ProjectLifecycleService, UpdateProjectRequest,
};
