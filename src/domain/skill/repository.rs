//! Skill repository interface

use async_trait::async_trait;

use super::{Skill, SkillId};
use crate::domain::DomainResult;

#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Skill>>;
    async fn find_by_id(&self, id: SkillId) -> DomainResult<Option<Skill>>;
    /// Ids without a matching skill are omitted, never an error.
    async fn find_by_ids(&self, ids: &[SkillId]) -> DomainResult<Vec<Skill>>;
    async fn insert(&self, name: String) -> DomainResult<Skill>;
    async fn count(&self) -> DomainResult<u64>;
}
