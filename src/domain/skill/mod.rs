//! Skill aggregate

pub mod model;
pub mod repository;

pub use model::{Skill, SkillId};
pub use repository::SkillRepository;
