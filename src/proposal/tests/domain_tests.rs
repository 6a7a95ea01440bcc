//! Unit tests for proposal domain types and finalisation rules.

use crate::directory::UserId;
use crate::project::{Budget, ProjectId};
use crate::proposal::domain::{
    CoverLetter, Proposal, ProposalDomainError, ProposalStatus,
};
use chrono::{TimeZone, Utc};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn pending_proposal(clock: DefaultClock) -> Result<Proposal, ProposalDomainError> {
    let deadline = Utc
        .with_ymd_and_hms(2030, 12, 25, 4, 30, 0)
        .single()
        .expect("valid timestamp");
    Ok(Proposal::new(
        ProjectId::new(),
        UserId::new(),
        CoverLetter::new("I have shipped three similar systems.")?,
        Budget::zero(),
        deadline,
        &clock,
    ))
}

#[rstest]
fn new_proposal_starts_pending(
    pending_proposal: Result<Proposal, ProposalDomainError>,
) -> eyre::Result<()> {
    let proposal = pending_proposal?;
    ensure!(proposal.status() == ProposalStatus::Pending);
    ensure!(!proposal.is_final());
    ensure!(proposal.created_at() == proposal.updated_at());
    Ok(())
}

#[rstest]
#[case(ProposalStatus::Accepted)]
#[case(ProposalStatus::Rejected)]
#[case(ProposalStatus::Withdrawn)]
fn finalize_moves_pending_to_terminal(
    clock: DefaultClock,
    pending_proposal: Result<Proposal, ProposalDomainError>,
    #[case] target: ProposalStatus,
) -> eyre::Result<()> {
    let mut proposal = pending_proposal?;
    proposal.finalize(target, &clock)?;
    ensure!(proposal.status() == target);
    ensure!(proposal.is_final());
    Ok(())
}

#[rstest]
fn finalize_twice_is_rejected(
    clock: DefaultClock,
    pending_proposal: Result<Proposal, ProposalDomainError>,
) -> eyre::Result<()> {
    let mut proposal = pending_proposal?;
    proposal.finalize(ProposalStatus::Rejected, &clock)?;

    let result = proposal.finalize(ProposalStatus::Accepted, &clock);
    let expected = Err(ProposalDomainError::AlreadyFinal {
        id: proposal.id(),
        status: ProposalStatus::Rejected,
    });
    ensure!(result == expected);
    ensure!(proposal.status() == ProposalStatus::Rejected);
    Ok(())
}

#[rstest]
fn finalize_to_pending_is_rejected(
    clock: DefaultClock,
    pending_proposal: Result<Proposal, ProposalDomainError>,
) -> eyre::Result<()> {
    let mut proposal = pending_proposal?;
    let result = proposal.finalize(ProposalStatus::Pending, &clock);
    ensure!(result == Err(ProposalDomainError::CannotReopen(proposal.id())));
    ensure!(proposal.status() == ProposalStatus::Pending);
    Ok(())
}

#[rstest]
#[case(ProposalStatus::Pending, false)]
#[case(ProposalStatus::Accepted, true)]
#[case(ProposalStatus::Rejected, true)]
#[case(ProposalStatus::Withdrawn, true)]
fn is_terminal_returns_expected(#[case] status: ProposalStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case(ProposalStatus::Pending, true)]
#[case(ProposalStatus::Accepted, true)]
#[case(ProposalStatus::Rejected, false)]
#[case(ProposalStatus::Withdrawn, false)]
fn blocks_resubmission_returns_expected(#[case] status: ProposalStatus, #[case] expected: bool) {
    assert_eq!(status.blocks_resubmission(), expected);
}

#[rstest]
#[case("pending", Some(ProposalStatus::Pending))]
#[case("Accepted", Some(ProposalStatus::Accepted))]
#[case("  rejected ", Some(ProposalStatus::Rejected))]
#[case("WITHDRAWN", Some(ProposalStatus::Withdrawn))]
#[case("approved", None)]
#[case("", None)]
fn status_parses_case_insensitively(
    #[case] raw: &str,
    #[case] expected: Option<ProposalStatus>,
) {
    assert_eq!(ProposalStatus::try_from(raw).ok(), expected);
}

#[rstest]
fn proposal_round_trips_through_json(
    pending_proposal: Result<Proposal, ProposalDomainError>,
) -> eyre::Result<()> {
    let proposal = pending_proposal?;
    let encoded = serde_json::to_string(&proposal)?;
    let decoded: Proposal = serde_json::from_str(&encoded)?;
    ensure!(decoded == proposal);
    ensure!(encoded.contains("\"pending\""));
    Ok(())
}

#[rstest]
fn cover_letter_trims_surrounding_whitespace() -> eyre::Result<()> {
    let letter = CoverLetter::new("  Happy to discuss scope.  ")?;
    ensure!(letter.as_str() == "Happy to discuss scope.");
    Ok(())
}

#[rstest]
fn cover_letter_rejects_empty_input() {
    let result = CoverLetter::new("   ");
    assert_eq!(result, Err(ProposalDomainError::EmptyCoverLetter));
}

#[rstest]
fn cover_letter_rejects_oversized_input() {
    let result = CoverLetter::new("x".repeat(2001));
    assert_eq!(
        result,
        Err(ProposalDomainError::CoverLetterTooLong {
            limit: 2000,
            length: 2001,
        })
    );
}
