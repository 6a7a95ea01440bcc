//! Role-gated proposal transition policy.
//!
//! The source system trusted its callers to pre-validate which role may
//! request which proposal transition. Here the table is an explicit value
//! the lifecycle service consults, so the rule is visible and testable.

use super::proposal::ProposalStatus;
use crate::directory::UserRole;
use std::collections::{HashMap, HashSet};

/// Table of proposal transitions each role may request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPolicy {
    allowed: HashMap<UserRole, HashSet<ProposalStatus>>,
}

impl TransitionPolicy {
    /// Creates an empty policy that denies every transition.
    #[must_use]
    pub fn deny_all() -> Self {
        Self {
            allowed: HashMap::new(),
        }
    }

    /// Grants `role` permission to request `target`.
    #[must_use]
    pub fn permit(mut self, role: UserRole, target: ProposalStatus) -> Self {
        self.allowed.entry(role).or_default().insert(target);
        self
    }

    /// Returns `true` when `role` may request a transition to `target`.
    #[must_use]
    pub fn allows(&self, role: UserRole, target: ProposalStatus) -> bool {
        self.allowed
            .get(&role)
            .is_some_and(|targets| targets.contains(&target))
    }
}

impl Default for TransitionPolicy {
    /// The marketplace's standard table: clients decide, freelancers may
    /// retract their own application, admins may do either.
    fn default() -> Self {
        Self::deny_all()
            .permit(UserRole::Client, ProposalStatus::Accepted)
            .permit(UserRole::Client, ProposalStatus::Rejected)
            .permit(UserRole::Freelancer, ProposalStatus::Withdrawn)
            .permit(UserRole::Admin, ProposalStatus::Accepted)
            .permit(UserRole::Admin, ProposalStatus::Rejected)
            .permit(UserRole::Admin, ProposalStatus::Withdrawn)
    }
}
