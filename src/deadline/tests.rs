//! Tests for deadline parsing, zone resolution, and futurity checks.

use super::{DeadlineError, DeadlineNormalizer, ReferenceZone, require_future};
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn normalizer() -> DeadlineNormalizer {
    let zone = ReferenceZone::india_standard_time().expect("IST should resolve");
    DeadlineNormalizer::new(zone)
}

#[rstest]
fn ist_wall_clock_converts_to_known_utc_instant(normalizer: DeadlineNormalizer) {
    let instant = normalizer
        .normalize("25-12-2030 10:00", "deadline")
        .expect("valid deadline string");

    let expected = Utc
        .with_ymd_and_hms(2030, 12, 25, 4, 30, 0)
        .single()
        .expect("unambiguous UTC instant");
    assert_eq!(instant, expected);
}

#[rstest]
fn midnight_ist_lands_on_previous_utc_day(normalizer: DeadlineNormalizer) {
    let instant = normalizer
        .normalize("01-01-2020 00:00", "deadline")
        .expect("valid deadline string");

    let expected = Utc
        .with_ymd_and_hms(2019, 12, 31, 18, 30, 0)
        .single()
        .expect("unambiguous UTC instant");
    assert_eq!(instant, expected);
}

#[rstest]
#[case("2030-12-25 10:00")]
#[case("25/12/2030 10:00")]
#[case("25-12-2030")]
#[case("25-12-2030 10:00:00")]
#[case("not a date")]
#[case("")]
fn malformed_strings_fail_with_invalid_format(
    normalizer: DeadlineNormalizer,
    #[case] raw: &str,
) {
    let result = normalizer.normalize(raw, "proposed_deadline");
    assert_eq!(
        result,
        Err(DeadlineError::InvalidFormat {
            field: "proposed_deadline".to_owned(),
            value: raw.to_owned(),
        })
    );
}

#[rstest]
fn windows_identifier_resolves_without_fallback() {
    let zone = ReferenceZone::resolve(&["India Standard Time"]).expect("should resolve");
    assert_eq!(zone, ReferenceZone::india_standard_time().expect("IST"));
}

#[rstest]
fn unknown_identifier_falls_back_to_next_candidate() {
    let zone =
        ReferenceZone::resolve(&["Bogus/Zone", "Asia/Kolkata"]).expect("fallback should resolve");
    assert_eq!(zone, ReferenceZone::india_standard_time().expect("IST"));
}

#[rstest]
fn unrecognised_candidates_fail_with_unknown_zone() {
    let result = ReferenceZone::resolve(&["Bogus/Zone", "Also/Bogus"]);
    assert_eq!(
        result,
        Err(DeadlineError::UnknownZone("Bogus/Zone, Also/Bogus".to_owned()))
    );
}

#[rstest]
fn future_instant_passes_futurity_check() {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("unambiguous instant");
    let later = now + chrono::Duration::minutes(1);
    assert_eq!(require_future(later, now), Ok(()));
}

#[rstest]
#[case::equal_to_now(0)]
#[case::in_the_past(-60)]
fn non_future_instant_fails_futurity_check(#[case] offset_seconds: i64) {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("unambiguous instant");
    let candidate: DateTime<Utc> = now + chrono::Duration::seconds(offset_seconds);
    assert_eq!(
        require_future(candidate, now),
        Err(DeadlineError::NotFuture(candidate))
    );
}
