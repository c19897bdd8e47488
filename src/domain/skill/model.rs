//! Skill domain entity

pub type SkillId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

impl Skill {
    pub fn new(id: SkillId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
