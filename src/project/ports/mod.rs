//! Port contracts for project persistence and freelancer statistics.

mod stats;
mod store;

pub use stats::{FreelancerStatsStore, StatsStoreError, StatsStoreResult};
pub use store::{ProjectDetails, ProjectStore, ProjectStoreError, ProjectStoreResult};
