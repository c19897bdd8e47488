//! Domain layer
//!
//! Entities, value objects and the repository interfaces the application
//! layer depends on. Nothing here knows about SeaORM or HTTP.

pub mod employee;
pub mod principal;
pub mod skill;

pub use employee::{service_cutoff, Employee, EmployeeId, EmployeeRepository, EmployeeType, NewEmployee};
pub use principal::Principal;
pub use skill::{Skill, SkillId, SkillRepository};

pub use crate::shared::{DomainError, DomainResult};
