//! Skill records and validated skill names.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Longest accepted skill name, matching the persisted column width.
const MAX_NAME_LENGTH: usize = 100;

/// Errors returned while constructing skill domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkillDomainError {
    /// The skill name is empty after trimming.
    #[error("skill name must not be empty")]
    EmptyName,

    /// The skill name exceeds the persisted column width.
    #[error("skill name '{0}' exceeds {MAX_NAME_LENGTH} characters")]
    NameTooLong(String),
}

/// Unique identifier for a canonical skill record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SkillId(Uuid);

impl SkillId {
    /// Creates a new random skill identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a skill identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SkillId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated skill name.
///
/// The display form preserves the caller's casing; equality and hashing
/// use the case-folded form so `"Rust"` and `"rust"` name the same skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    /// Creates a validated skill name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillDomainError::EmptyName`] when the trimmed value is
    /// empty, or [`SkillDomainError::NameTooLong`] when it exceeds the
    /// column width.
    pub fn new(value: impl Into<String>) -> Result<Self, SkillDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SkillDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(SkillDomainError::NameTooLong(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the display form of the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the case-folded form used for uniqueness.
    #[must_use]
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for SkillName {
    fn eq(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }
}

impl Eq for SkillName {}

impl std::hash::Hash for SkillName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

impl AsRef<str> for SkillName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical skill record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    id: SkillId,
    name: SkillName,
}

impl Skill {
    /// Creates a new skill record with a fresh identifier.
    #[must_use]
    pub fn new(name: SkillName) -> Self {
        Self {
            id: SkillId::new(),
            name,
        }
    }

    /// Reconstructs a skill from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: SkillId, name: SkillName) -> Self {
        Self { id, name }
    }

    /// Returns the skill identifier.
    #[must_use]
    pub const fn id(&self) -> SkillId {
        self.id
    }

    /// Returns the skill name.
    #[must_use]
    pub const fn name(&self) -> &SkillName {
        &self.name
    }
}
