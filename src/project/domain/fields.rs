//! Validated textual fields for the project domain.

use super::error::ProjectDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted project title, matching the persisted column width.
const MAX_TITLE_LENGTH: usize = 200;

/// Validated project title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectTitle(String);

impl ProjectTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyTitle`] when the trimmed value
    /// is empty, or [`ProjectDomainError::TitleTooLong`] when it exceeds
    /// the column width.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(ProjectDomainError::TitleTooLong {
                limit: MAX_TITLE_LENGTH,
                length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectDescription(String);

impl ProjectDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyDescription`] when the trimmed
    /// value is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the description text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
