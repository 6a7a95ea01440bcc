//! In-memory skill and join stores for tests.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use super::domain::{Skill, SkillId, SkillName};
use super::ports::{ProjectSkillStore, SkillStore, SkillStoreError, SkillStoreResult};
use crate::project::ProjectId;

fn poisoned(err: impl std::fmt::Display) -> SkillStoreError {
    SkillStoreError::persistence(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory canonical skill store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySkillStore {
    state: Arc<RwLock<SkillState>>,
}

#[derive(Debug, Default)]
struct SkillState {
    skills: HashMap<SkillId, Skill>,
    name_index: HashMap<String, SkillId>,
}

impl InMemorySkillStore {
    /// Creates an empty skill store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of canonical skills stored.
    ///
    /// # Errors
    ///
    /// Returns [`SkillStoreError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> SkillStoreResult<usize> {
        Ok(self.state.read().map_err(poisoned)?.skills.len())
    }

    /// Returns `true` when no skills are stored.
    ///
    /// # Errors
    ///
    /// Returns [`SkillStoreError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> SkillStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SkillStore for InMemorySkillStore {
    async fn find_by_name(&self, name: &SkillName) -> SkillStoreResult<Option<Skill>> {
        let state = self.state.read().map_err(poisoned)?;
        let skill = state
            .name_index
            .get(&name.folded())
            .and_then(|id| state.skills.get(id))
            .cloned();
        Ok(skill)
    }

    async fn insert(&self, skill: &Skill) -> SkillStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let key = skill.name().folded();
        if state.name_index.contains_key(&key) {
            return Err(SkillStoreError::DuplicateName(skill.name().clone()));
        }
        state.name_index.insert(key, skill.id());
        state.skills.insert(skill.id(), skill.clone());
        Ok(())
    }
}

/// Thread-safe in-memory project-skill join store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectSkillStore {
    joins: Arc<RwLock<HashMap<ProjectId, BTreeSet<SkillId>>>>,
}

impl InMemoryProjectSkillStore {
    /// Creates an empty join store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectSkillStore for InMemoryProjectSkillStore {
    async fn list_for_project(&self, project_id: ProjectId) -> SkillStoreResult<Vec<SkillId>> {
        let joins = self.joins.read().map_err(poisoned)?;
        Ok(joins
            .get(&project_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn add(&self, project_id: ProjectId, skill_id: SkillId) -> SkillStoreResult<()> {
        let mut joins = self.joins.write().map_err(poisoned)?;
        joins.entry(project_id).or_default().insert(skill_id);
        Ok(())
    }

    async fn remove(&self, project_id: ProjectId, skill_id: SkillId) -> SkillStoreResult<()> {
        let mut joins = self.joins.write().map_err(poisoned)?;
        if let Some(set) = joins.get_mut(&project_id) {
            set.remove(&skill_id);
            if set.is_empty() {
                joins.remove(&project_id);
            }
        }
        Ok(())
    }
}
