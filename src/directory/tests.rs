//! Tests for user role lookup and the in-memory directory.

use super::{InMemoryUserDirectory, UserDirectory, UserId, UserRole};
use rstest::rstest;

#[rstest]
#[case(UserRole::Client, "client")]
#[case(UserRole::Freelancer, "freelancer")]
#[case(UserRole::Admin, "admin")]
fn role_as_str_matches_canonical_form(#[case] role: UserRole, #[case] expected: &str) {
    assert_eq!(role.as_str(), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_user_is_found_with_role() {
    let directory = InMemoryUserDirectory::new();
    let id = directory
        .register(UserRole::Freelancer)
        .expect("registration should succeed");

    let record = directory
        .find_by_id(id)
        .await
        .expect("lookup should succeed")
        .expect("user should exist");

    assert_eq!(record.id, id);
    assert!(record.has_role(UserRole::Freelancer));
    assert!(!record.has_role(UserRole::Client));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_user_lookup_returns_none() {
    let directory = InMemoryUserDirectory::new();
    let found = directory
        .find_by_id(UserId::new())
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}
