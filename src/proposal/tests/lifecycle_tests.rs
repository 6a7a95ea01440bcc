//! Service orchestration tests for proposal submission and transitions.

use std::sync::Arc;

use crate::deadline::{DeadlineError, DeadlineNormalizer, ReferenceZone};
use crate::directory::{InMemoryUserDirectory, UserId, UserRole};
use crate::project::{
    Budget, Project, ProjectDescription, ProjectTitle,
    adapters::memory::InMemoryProjectStore,
    ports::ProjectStore,
};
use crate::proposal::{
    adapters::memory::InMemoryProposalStore,
    domain::ProposalStatus,
    services::{CreateProposalRequest, ProposalLifecycleError, ProposalLifecycleService},
};
use chrono::{TimeZone, Utc};
use eyre::{OptionExt, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;

type TestService = ProposalLifecycleService<
    InMemoryProposalStore,
    InMemoryProjectStore,
    InMemoryUserDirectory,
    DefaultClock,
>;

struct Harness {
    proposals: Arc<InMemoryProposalStore>,
    projects: Arc<InMemoryProjectStore>,
    directory: Arc<InMemoryUserDirectory>,
    service: TestService,
}

#[fixture]
fn harness() -> eyre::Result<Harness> {
    let proposals = Arc::new(InMemoryProposalStore::new());
    let projects = Arc::new(InMemoryProjectStore::new(Arc::clone(&proposals)));
    let directory = Arc::new(InMemoryUserDirectory::new());
    let service = ProposalLifecycleService::new(
        Arc::clone(&proposals),
        Arc::clone(&projects),
        Arc::clone(&directory),
        DeadlineNormalizer::new(ReferenceZone::india_standard_time()?),
        Arc::new(DefaultClock),
    );
    Ok(Harness {
        proposals,
        projects,
        directory,
        service,
    })
}

async fn open_project(harness: &Harness) -> eyre::Result<Project> {
    let client_id = harness.directory.register(UserRole::Client)?;
    let project = Project::new(
        client_id,
        ProjectTitle::new("Marketplace revamp")?,
        ProjectDescription::new("Rebuild the listing pages")?,
        Budget::new(Decimal::from(5000))?,
        None,
        &DefaultClock,
    );
    harness.projects.insert(&project).await?;
    Ok(project)
}

fn request_for(project: &Project) -> CreateProposalRequest {
    CreateProposalRequest::new(
        project.id(),
        "I have shipped three similar systems.",
        Decimal::from(4200),
        "25-12-2030 10:00",
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_pending_proposal(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;

    let created = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;

    ensure!(created.status() == ProposalStatus::Pending);
    let expected_deadline = Utc
        .with_ymd_and_hms(2030, 12, 25, 4, 30, 0)
        .single()
        .ok_or_eyre("valid timestamp")?;
    ensure!(created.proposed_deadline() == expected_deadline);

    let fetched = harness.service.find(created.id()).await?;
    ensure!(fetched == Some(created));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_none_for_unknown_freelancer(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;

    let created = harness
        .service
        .create(UserId::new(), request_for(&project))
        .await?;
    ensure!(created.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_none_when_actor_is_a_client(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let client_id = harness.directory.register(UserRole::Client)?;

    let created = harness.service.create(client_id, request_for(&project)).await?;
    ensure!(created.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_returns_none_for_missing_project(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let request = CreateProposalRequest::new(
        crate::project::ProjectId::new(),
        "Ready when you are.",
        Decimal::from(100),
        "25-12-2030 10:00",
    );

    let created = harness.service.create(freelancer_id, request).await?;
    ensure!(created.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_non_open_project(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let mut project = open_project(&harness).await?;
    let assignee = harness.directory.register(UserRole::Freelancer)?;
    project.assign_to(assignee, &DefaultClock)?;
    harness.projects.update(&project).await?;

    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let result = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await;

    ensure!(matches!(
        result,
        Err(ProposalLifecycleError::ProjectNotOpen(id)) if id == project.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_pending_proposal(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?;

    let result = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await;

    ensure!(matches!(
        result,
        Err(ProposalLifecycleError::DuplicateProposal { project_id, .. })
            if project_id == project.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_allows_resubmission_after_rejection(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let client_id = project.client_id();
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let first = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;

    harness
        .service
        .update_status(first.id(), "rejected", client_id)
        .await?
        .ok_or_eyre("expected the rejection to apply")?;

    let second = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?;
    ensure!(second.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_past_deadline(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let request = CreateProposalRequest::new(
        project.id(),
        "Ready when you are.",
        Decimal::from(100),
        "01-01-2020 09:00",
    );

    let result = harness.service.create(freelancer_id, request).await;
    ensure!(matches!(
        result,
        Err(ProposalLifecycleError::Deadline(DeadlineError::NotFuture(_)))
    ));
    Ok(())
}

#[rstest]
#[case("2030-12-25 10:00")]
#[case("25/12/2030 10:00")]
#[case("not a date")]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_malformed_deadline(
    harness: eyre::Result<Harness>,
    #[case] raw: &str,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let request = CreateProposalRequest::new(
        project.id(),
        "Ready when you are.",
        Decimal::from(100),
        raw,
    );

    let result = harness.service.create(freelancer_id, request).await;
    ensure!(matches!(
        result,
        Err(ProposalLifecycleError::Deadline(DeadlineError::InvalidFormat { .. }))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn client_accepts_pending_proposal(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let proposal = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;

    let updated = harness
        .service
        .update_status(proposal.id(), "accepted", project.client_id())
        .await?
        .ok_or_eyre("expected the acceptance to apply")?;

    ensure!(updated.status() == ProposalStatus::Accepted);
    ensure!(updated.updated_at() >= proposal.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn policy_denies_freelancer_accepting_own_proposal(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let proposal = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;

    let updated = harness
        .service
        .update_status(proposal.id(), "accepted", freelancer_id)
        .await?;

    ensure!(updated.is_none());
    let fetched = harness
        .service
        .find(proposal.id())
        .await?
        .ok_or_eyre("proposal should still exist")?;
    ensure!(fetched.status() == ProposalStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_on_terminal_proposal_is_a_noop(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let proposal = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;
    harness
        .service
        .update_status(proposal.id(), "withdrawn", freelancer_id)
        .await?
        .ok_or_eyre("expected the withdrawal to apply")?;

    let updated = harness
        .service
        .update_status(proposal.id(), "accepted", project.client_id())
        .await?;
    ensure!(updated.is_none());
    Ok(())
}

#[rstest]
#[case("approved")]
#[case("pending")]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_with_unusable_target_is_a_noop(
    harness: eyre::Result<Harness>,
    #[case] target: &str,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let proposal = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;

    let updated = harness
        .service
        .update_status(proposal.id(), target, project.client_id())
        .await?;
    ensure!(updated.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_soft_deletes_pending_proposal(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let proposal = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;

    ensure!(harness.service.delete(proposal.id()).await?);
    ensure!(harness.service.find(proposal.id()).await?.is_none());
    ensure!(harness.proposals.is_soft_deleted(proposal.id())?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_refuses_finalised_proposal(harness: eyre::Result<Harness>) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let freelancer_id = harness.directory.register(UserRole::Freelancer)?;
    let proposal = harness
        .service
        .create(freelancer_id, request_for(&project))
        .await?
        .ok_or_eyre("expected a created proposal")?;
    harness
        .service
        .update_status(proposal.id(), "accepted", project.client_id())
        .await?
        .ok_or_eyre("expected the acceptance to apply")?;

    ensure!(!harness.service.delete(proposal.id()).await?);
    ensure!(harness.service.find(proposal.id()).await?.is_some());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listings_cover_project_and_freelancer_views(
    harness: eyre::Result<Harness>,
) -> eyre::Result<()> {
    let harness = harness?;
    let project = open_project(&harness).await?;
    let other_project = open_project(&harness).await?;
    let first = harness.directory.register(UserRole::Freelancer)?;
    let second = harness.directory.register(UserRole::Freelancer)?;
    harness.service.create(first, request_for(&project)).await?;
    harness.service.create(second, request_for(&project)).await?;
    harness
        .service
        .create(first, request_for(&other_project))
        .await?;

    let by_project = harness.service.list_for_project(project.id()).await?;
    ensure!(by_project.len() == 2);

    let by_freelancer = harness.service.list_by_freelancer(first).await?;
    ensure!(by_freelancer.len() == 2);
    ensure!(by_freelancer.iter().all(|p| p.freelancer_id() == first));
    Ok(())
}
