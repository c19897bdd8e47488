use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Skill, SkillId, SkillRepository};

pub struct SkillService {
    skills: Arc<dyn SkillRepository>,
}

impl SkillService {
    pub fn new(skills: Arc<dyn SkillRepository>) -> Self {
        Self { skills }
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Skill>> {
        self.skills.find_all().await
    }

    pub async fn find_by_id(&self, id: SkillId) -> DomainResult<Skill> {
        self.skills
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::skill_not_found(id))
    }

    pub async fn create(&self, name: &str) -> DomainResult<Skill> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Skill name must not be blank".into()));
        }

        let skill = self.skills.insert(name.to_string()).await?;
        info!(skill_id = skill.id, name = %skill.name, "Skill created");
        Ok(skill)
    }

    /// Insert every name from `names` when the catalogue is still empty.
    /// Returns how many skills were created.
    pub async fn seed(&self, names: &[String]) -> DomainResult<usize> {
        if self.skills.count().await? > 0 {
            return Ok(0);
        }

        let mut created = 0;
        for name in names {
            match self.create(name).await {
                Ok(_) => created += 1,
                Err(DomainError::Conflict(_)) | Err(DomainError::Validation(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }
}
