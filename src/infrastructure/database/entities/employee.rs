//! Employee entity for database

use sea_orm::entity::prelude::*;

/// Employee type, stored as its upper-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum EmployeeType {
    #[sea_orm(string_value = "REGULAR")]
    Regular,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

/// Employee model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub employee_type: EmployeeType,
    pub employment_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_skill::Entity")]
    EmployeeSkills,
}

impl Related<super::employee_skill::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeSkills.def()
    }
}

impl Related<super::skill::Entity> for Entity {
    fn to() -> RelationDef {
        super::employee_skill::Relation::Skill.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::employee_skill::Relation::Employee.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
