//! Find-or-create skill resolution and project skill-set reconciliation.

use super::domain::{Skill, SkillDomainError, SkillId, SkillName};
use super::ports::{ProjectSkillStore, SkillStore, SkillStoreError};
use crate::project::ProjectId;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while resolving skill names.
#[derive(Debug, Clone, Error)]
pub enum SkillResolveError {
    /// A supplied name failed validation.
    #[error(transparent)]
    Domain(#[from] SkillDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] SkillStoreError),
}

/// Outcome of reconciling a project's skill set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillSetChange {
    /// Joins inserted by this reconciliation.
    pub added: Vec<SkillId>,
    /// Joins removed by this reconciliation.
    pub removed: Vec<SkillId>,
    /// Joins already present and left untouched.
    pub kept: Vec<SkillId>,
}

impl SkillSetChange {
    /// Returns `true` when the reconciliation changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Resolves free-text skill names to canonical records and reconciles
/// project skill sets.
#[derive(Clone)]
pub struct SkillResolver<S, J>
where
    S: SkillStore,
    J: ProjectSkillStore,
{
    skills: Arc<S>,
    joins: Arc<J>,
}

impl<S, J> SkillResolver<S, J>
where
    S: SkillStore,
    J: ProjectSkillStore,
{
    /// Creates a resolver over the given stores.
    #[must_use]
    pub const fn new(skills: Arc<S>, joins: Arc<J>) -> Self {
        Self { skills, joins }
    }

    /// Resolves each distinct name to a canonical skill, creating records
    /// on miss.
    ///
    /// Names are trimmed and deduplicated case-insensitively before
    /// processing; the first spelling of a duplicated name wins. Newly
    /// created records are visible to concurrent readers immediately — the
    /// commit boundary belongs to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SkillResolveError::Domain`] for invalid names and
    /// [`SkillResolveError::Store`] for store failures.
    pub async fn resolve(&self, names: &[String]) -> Result<Vec<Skill>, SkillResolveError> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();
        for raw in names {
            let name = SkillName::new(raw.clone())?;
            if !seen.insert(name.folded()) {
                continue;
            }
            resolved.push(self.find_or_create(name).await?);
        }
        Ok(resolved)
    }

    /// Reconciles the project's join set with the desired names as a true
    /// set-diff: inserts additions, removes leftovers, and leaves the
    /// intersection untouched.
    ///
    /// Applying the same desired set twice is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Returns [`SkillResolveError`] when name validation or a store
    /// operation fails.
    pub async fn diff_and_apply(
        &self,
        project_id: ProjectId,
        desired_names: &[String],
    ) -> Result<SkillSetChange, SkillResolveError> {
        let desired: Vec<SkillId> = self
            .resolve(desired_names)
            .await?
            .iter()
            .map(Skill::id)
            .collect();
        let desired_set: HashSet<SkillId> = desired.iter().copied().collect();
        let current: HashSet<SkillId> = self
            .joins
            .list_for_project(project_id)
            .await?
            .into_iter()
            .collect();

        let mut change = SkillSetChange::default();
        for skill_id in &desired {
            if current.contains(skill_id) {
                change.kept.push(*skill_id);
            } else {
                self.joins.add(project_id, *skill_id).await?;
                change.added.push(*skill_id);
            }
        }
        let mut leftovers: Vec<SkillId> = current.difference(&desired_set).copied().collect();
        leftovers.sort_unstable();
        for skill_id in leftovers {
            self.joins.remove(project_id, skill_id).await?;
            change.removed.push(skill_id);
        }
        Ok(change)
    }

    async fn find_or_create(&self, name: SkillName) -> Result<Skill, SkillResolveError> {
        if let Some(existing) = self.skills.find_by_name(&name).await? {
            return Ok(existing);
        }
        let skill = Skill::new(name);
        self.skills.insert(&skill).await?;
        Ok(skill)
    }
}
