//! Create employee_skills join table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_skills::Skills;
use super::m20240101_000002_create_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmployeeSkills::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeSkills::EmployeeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmployeeSkills::SkillId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(EmployeeSkills::EmployeeId)
                            .col(EmployeeSkills::SkillId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_skills_employee")
                            .from(EmployeeSkills::Table, EmployeeSkills::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_skills_skill")
                            .from(EmployeeSkills::Table, EmployeeSkills::SkillId)
                            .to(Skills::Table, Skills::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup of employees by skill
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_skills_skill")
                    .table(EmployeeSkills::Table)
                    .col(EmployeeSkills::SkillId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeSkills::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum EmployeeSkills {
    Table,
    EmployeeId,
    SkillId,
}
