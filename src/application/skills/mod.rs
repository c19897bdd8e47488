//! Skill catalogue

pub mod service;

pub use service::SkillService;
