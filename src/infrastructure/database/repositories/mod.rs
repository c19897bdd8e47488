//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories.

pub mod employee_repository;
pub mod skill_repository;

pub use employee_repository::SeaOrmEmployeeRepository;
pub use skill_repository::SeaOrmSkillRepository;

use crate::domain::DomainError;
use crate::shared::InfraError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::from(e).into()
}

pub(crate) fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}
