//! Canonical skill vocabulary and project skill-set resolution.
//!
//! Skills are shared vocabulary records with case-insensitive unique
//! names. The resolver turns free-text skill names into canonical records
//! with create-on-miss semantics, and reconciles a project's skill set as
//! a true set-diff: joins in the intersection are left untouched rather
//! than being dropped and reinserted.

mod domain;
mod memory;
mod ports;
mod resolver;

pub use domain::{Skill, SkillDomainError, SkillId, SkillName};
pub use memory::{InMemoryProjectSkillStore, InMemorySkillStore};
pub use ports::{ProjectSkillStore, SkillStore, SkillStoreError, SkillStoreResult};
pub use resolver::{SkillResolveError, SkillResolver, SkillSetChange};
