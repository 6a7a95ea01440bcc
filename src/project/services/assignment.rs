//! The assignment cascade: accept the winner, reject the rest.

use crate::notification::{Notice, NotificationSink};
use crate::project::domain::Project;
use crate::proposal::{
    domain::{Proposal, ProposalId, ProposalStatus},
    ports::ProposalStore,
};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// The individual side effects the cascade performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeEffect {
    /// Finalising the winning proposal as Accepted.
    AcceptWinner,
    /// Finalising a competing proposal as Rejected.
    RejectCompetitor,
    /// Delivering the acceptance notice to the winner.
    NotifyWinner,
    /// Delivering the rejection notice to a competitor.
    NotifyCompetitor,
}

impl fmt::Display for CascadeEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AcceptWinner => "accept winner",
            Self::RejectCompetitor => "reject competitor",
            Self::NotifyWinner => "notify winner",
            Self::NotifyCompetitor => "notify competitor",
        };
        f.write_str(name)
    }
}

/// A cascade side effect that did not land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeFailure {
    /// Which effect failed.
    pub effect: CascadeEffect,
    /// The proposal the effect concerned.
    pub proposal_id: ProposalId,
    /// Rendered error detail.
    pub detail: String,
}

/// Observable outcome of an assignment cascade.
///
/// Effects are independent: one failure never rolls back or suppresses
/// the others, it only lands here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// The proposal finalised as Accepted, when that effect landed.
    pub accepted: Option<ProposalId>,
    /// Competing proposals finalised as Rejected.
    pub rejected: Vec<ProposalId>,
    /// Effects that failed.
    pub failures: Vec<CascadeFailure>,
}

impl CascadeReport {
    /// Returns `true` when every effect landed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, effect: CascadeEffect, proposal_id: ProposalId, detail: impl fmt::Display) {
        warn!(
            effect = %effect,
            proposal_id = %proposal_id,
            error = %detail,
            "assignment cascade effect failed",
        );
        self.failures.push(CascadeFailure {
            effect,
            proposal_id,
            detail: detail.to_string(),
        });
    }
}

/// Runs the side effects of awarding a project to one proposal.
///
/// Proposal transitions here are system-initiated and bypass the
/// role-gated transition policy.
#[derive(Clone)]
pub struct AssignmentCoordinator<P, N, C>
where
    P: ProposalStore,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    proposals: Arc<P>,
    sink: Arc<N>,
    clock: Arc<C>,
}

impl<P, N, C> AssignmentCoordinator<P, N, C>
where
    P: ProposalStore,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the given store and sink.
    #[must_use]
    pub const fn new(proposals: Arc<P>, sink: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            proposals,
            sink,
            clock,
        }
    }

    /// Accepts the winner, rejects every competing Pending proposal from
    /// other freelancers, and notifies each affected freelancer.
    ///
    /// `competing` is the project's live proposal list; the winner and
    /// proposals sharing the winner's freelancer are skipped. Returns a
    /// report rather than an error: the project assignment has already
    /// been persisted when this runs, so the cascade records what landed
    /// instead of failing the operation.
    pub async fn run(
        &self,
        project: &Project,
        mut winner: Proposal,
        competing: Vec<Proposal>,
    ) -> CascadeReport {
        let mut report = CascadeReport::default();
        let title = project.title().as_str();
        let winner_id = winner.id();
        let winner_freelancer = winner.freelancer_id();

        match winner.finalize(ProposalStatus::Accepted, &*self.clock) {
            Ok(()) => match self.proposals.update(&winner).await {
                Ok(()) => {
                    report.accepted = Some(winner_id);
                    if let Err(err) = self
                        .sink
                        .notify(&Notice::proposal_accepted(winner_freelancer, title))
                        .await
                    {
                        report.record(CascadeEffect::NotifyWinner, winner_id, err);
                    }
                }
                Err(err) => report.record(CascadeEffect::AcceptWinner, winner_id, err),
            },
            Err(err) => report.record(CascadeEffect::AcceptWinner, winner_id, err),
        }

        for mut loser in competing {
            if loser.id() == winner_id
                || loser.freelancer_id() == winner_freelancer
                || loser.status() != ProposalStatus::Pending
            {
                continue;
            }
            let loser_id = loser.id();
            match loser.finalize(ProposalStatus::Rejected, &*self.clock) {
                Ok(()) => match self.proposals.update(&loser).await {
                    Ok(()) => {
                        report.rejected.push(loser_id);
                        if let Err(err) = self
                            .sink
                            .notify(&Notice::awarded_elsewhere(loser.freelancer_id(), title))
                            .await
                        {
                            report.record(CascadeEffect::NotifyCompetitor, loser_id, err);
                        }
                    }
                    Err(err) => report.record(CascadeEffect::RejectCompetitor, loser_id, err),
                },
                Err(err) => report.record(CascadeEffect::RejectCompetitor, loser_id, err),
            }
        }

        report
    }
}
