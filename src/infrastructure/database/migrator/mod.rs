//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_skills;
mod m20240101_000002_create_employees;
mod m20240101_000003_create_employee_skills;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_skills::Migration),
            Box::new(m20240101_000002_create_employees::Migration),
            Box::new(m20240101_000003_create_employee_skills::Migration),
        ]
    }
}
