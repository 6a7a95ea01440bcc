//! Unit tests for project status transition validation.

use crate::project::domain::ProjectStatus;
use rstest::rstest;

#[rstest]
#[case(ProjectStatus::Open, ProjectStatus::Open, false)]
#[case(ProjectStatus::Open, ProjectStatus::Assigned, true)]
#[case(ProjectStatus::Open, ProjectStatus::InProgress, false)]
#[case(ProjectStatus::Open, ProjectStatus::Completed, false)]
#[case(ProjectStatus::Open, ProjectStatus::Cancelled, true)]
#[case(ProjectStatus::Assigned, ProjectStatus::Open, true)]
#[case(ProjectStatus::Assigned, ProjectStatus::Assigned, false)]
#[case(ProjectStatus::Assigned, ProjectStatus::InProgress, true)]
#[case(ProjectStatus::Assigned, ProjectStatus::Completed, true)]
#[case(ProjectStatus::Assigned, ProjectStatus::Cancelled, true)]
#[case(ProjectStatus::InProgress, ProjectStatus::Open, false)]
#[case(ProjectStatus::InProgress, ProjectStatus::Assigned, false)]
#[case(ProjectStatus::InProgress, ProjectStatus::InProgress, false)]
#[case(ProjectStatus::InProgress, ProjectStatus::Completed, true)]
#[case(ProjectStatus::InProgress, ProjectStatus::Cancelled, false)]
#[case(ProjectStatus::Completed, ProjectStatus::Open, false)]
#[case(ProjectStatus::Completed, ProjectStatus::Assigned, false)]
#[case(ProjectStatus::Completed, ProjectStatus::InProgress, false)]
#[case(ProjectStatus::Completed, ProjectStatus::Completed, false)]
#[case(ProjectStatus::Completed, ProjectStatus::Cancelled, false)]
#[case(ProjectStatus::Cancelled, ProjectStatus::Open, false)]
#[case(ProjectStatus::Cancelled, ProjectStatus::Assigned, false)]
#[case(ProjectStatus::Cancelled, ProjectStatus::InProgress, false)]
#[case(ProjectStatus::Cancelled, ProjectStatus::Completed, false)]
#[case(ProjectStatus::Cancelled, ProjectStatus::Cancelled, false)]
fn can_transition_to_returns_expected(
    #[case] from: ProjectStatus,
    #[case] to: ProjectStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(ProjectStatus::Open, false)]
#[case(ProjectStatus::Assigned, false)]
#[case(ProjectStatus::InProgress, false)]
#[case(ProjectStatus::Completed, true)]
#[case(ProjectStatus::Cancelled, true)]
fn is_terminal_returns_expected(#[case] status: ProjectStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case(ProjectStatus::Open, false)]
#[case(ProjectStatus::Assigned, true)]
#[case(ProjectStatus::InProgress, true)]
#[case(ProjectStatus::Completed, true)]
#[case(ProjectStatus::Cancelled, false)]
fn carries_assignee_returns_expected(#[case] status: ProjectStatus, #[case] expected: bool) {
    assert_eq!(status.carries_assignee(), expected);
}

#[rstest]
#[case(ProjectStatus::Open, "open")]
#[case(ProjectStatus::InProgress, "in_progress")]
#[case(ProjectStatus::Cancelled, "cancelled")]
fn status_serialises_as_snake_case(
    #[case] status: ProjectStatus,
    #[case] expected: &str,
) -> eyre::Result<()> {
    let value = serde_json::to_value(status)?;
    eyre::ensure!(value == serde_json::Value::String(expected.to_owned()));
    Ok(())
}

#[rstest]
#[case("open", Some(ProjectStatus::Open))]
#[case("Assigned", Some(ProjectStatus::Assigned))]
#[case("IN_PROGRESS", Some(ProjectStatus::InProgress))]
#[case(" completed ", Some(ProjectStatus::Completed))]
#[case("cancelled", Some(ProjectStatus::Cancelled))]
#[case("closed", None)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: Option<ProjectStatus>) {
    assert_eq!(ProjectStatus::try_from(raw).ok(), expected);
}
