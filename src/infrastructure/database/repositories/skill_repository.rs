use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::{db_err, is_unique_violation};
use crate::domain::{DomainError, DomainResult, Skill, SkillId, SkillRepository};
use crate::infrastructure::database::entities::skill;

pub struct SeaOrmSkillRepository {
    db: DatabaseConnection,
}

impl SeaOrmSkillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn skill_model_to_domain(model: skill::Model) -> Skill {
    Skill {
        id: model.id,
        name: model.name,
    }
}

#[async_trait]
impl SkillRepository for SeaOrmSkillRepository {
    async fn find_all(&self) -> DomainResult<Vec<Skill>> {
        let models = skill::Entity::find()
            .order_by_asc(skill::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(skill_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: SkillId) -> DomainResult<Option<Skill>> {
        let model = skill::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(skill_model_to_domain))
    }

    async fn find_by_ids(&self, ids: &[SkillId]) -> DomainResult<Vec<Skill>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = skill::Entity::find()
            .filter(skill::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(skill::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(skill_model_to_domain).collect())
    }

    async fn insert(&self, name: String) -> DomainResult<Skill> {
        let new_skill = skill::ActiveModel {
            id: NotSet,
            name: Set(name.clone()),
        };

        let model = new_skill.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("Skill '{}' already exists", name))
            } else {
                db_err(e)
            }
        })?;

        Ok(skill_model_to_domain(model))
    }

    async fn count(&self) -> DomainResult<u64> {
        skill::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
