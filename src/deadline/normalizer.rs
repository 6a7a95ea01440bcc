//! Reference-zone resolution and deadline string normalisation.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Textual pattern deadlines must match, in chrono strftime syntax.
const DEADLINE_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Human-readable form of [`DEADLINE_FORMAT`] for error messages.
const DEADLINE_FORMAT_HUMAN: &str = "dd-MM-yyyy HH:mm";

/// Zone identifiers the core recognises, with their UTC offsets in seconds.
///
/// India Standard Time appears under both its Windows and IANA names; zone
/// databases disagree on which identifier is installed, so both resolve to
/// the same offset.
const KNOWN_ZONES: &[(&str, i32)] = &[
    ("India Standard Time", 19_800),
    ("Asia/Kolkata", 19_800),
    ("UTC", 0),
    ("Etc/UTC", 0),
];

/// Errors raised while normalising or validating deadlines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeadlineError {
    /// The raw string did not match the expected pattern.
    #[error("invalid date/time format for {field}: '{value}', expected '{DEADLINE_FORMAT_HUMAN}'")]
    InvalidFormat {
        /// Name of the field the string was supplied for.
        field: String,
        /// The offending raw value.
        value: String,
    },

    /// None of the candidate zone identifiers is recognised.
    #[error("no recognised zone identifier among: {0}")]
    UnknownZone(String),

    /// The deadline lies at or before the current instant.
    #[error("deadline must be in the future, got {0}")]
    NotFuture(DateTime<Utc>),
}

impl DeadlineError {
    fn invalid_format(field: &str, value: &str) -> Self {
        Self::InvalidFormat {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// A wall-clock reference zone resolved once at startup.
///
/// Deadlines are typed by users in this zone regardless of where the
/// server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceZone {
    offset: FixedOffset,
}

impl ReferenceZone {
    /// Resolves the first recognised identifier from an ordered candidate
    /// list.
    ///
    /// Later candidates act as fallbacks for the earlier ones, covering
    /// systems whose zone database installs a different identifier for the
    /// same zone.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::UnknownZone`] when no candidate is
    /// recognised.
    pub fn resolve(candidates: &[&str]) -> Result<Self, DeadlineError> {
        candidates
            .iter()
            .find_map(|candidate| {
                KNOWN_ZONES
                    .iter()
                    .find(|(name, _)| name == candidate)
                    .and_then(|(_, seconds)| FixedOffset::east_opt(*seconds))
            })
            .map(|offset| Self { offset })
            .ok_or_else(|| DeadlineError::UnknownZone(candidates.join(", ")))
    }

    /// Resolves India Standard Time, trying the Windows identifier first
    /// and the IANA one as fallback.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::UnknownZone`] when neither identifier is
    /// recognised.
    pub fn india_standard_time() -> Result<Self, DeadlineError> {
        Self::resolve(&["India Standard Time", "Asia/Kolkata"])
    }

    /// Returns the UTC offset of the zone.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Parses local wall-clock deadline strings into UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineNormalizer {
    zone: ReferenceZone,
}

impl DeadlineNormalizer {
    /// Creates a normaliser anchored to the given reference zone.
    #[must_use]
    pub const fn new(zone: ReferenceZone) -> Self {
        Self { zone }
    }

    /// Parses `raw` as a wall-clock time in the reference zone and converts
    /// it to UTC.
    ///
    /// `field` names the originating field in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`DeadlineError::InvalidFormat`] when `raw` does not match
    /// `dd-MM-yyyy HH:mm` or the value cannot be represented.
    pub fn normalize(&self, raw: &str, field: &str) -> Result<DateTime<Utc>, DeadlineError> {
        let wall_clock = NaiveDateTime::parse_from_str(raw, DEADLINE_FORMAT)
            .map_err(|_| DeadlineError::invalid_format(field, raw))?;
        let as_utc = wall_clock
            .checked_sub_offset(self.zone.offset)
            .ok_or_else(|| DeadlineError::invalid_format(field, raw))?;
        Ok(Utc.from_utc_datetime(&as_utc))
    }
}

/// Requires a normalised deadline to lie strictly after `now`.
///
/// # Errors
///
/// Returns [`DeadlineError::NotFuture`] when the deadline is at or before
/// `now`.
pub fn require_future(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), DeadlineError> {
    if deadline <= now {
        return Err(DeadlineError::NotFuture(deadline));
    }
    Ok(())
}
