//! In-memory store implementations

mod memory;

pub use memory::{InMemoryEmployeeRepository, InMemorySkillRepository};
