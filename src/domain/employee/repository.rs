//! Employee repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{Employee, EmployeeId, NewEmployee};
use crate::domain::{DomainResult, Skill};

/// Employee store. Every returned employee carries its full skill set.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Employee>>;
    async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Option<Employee>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>>;

    async fn find_by_skill(&self, skill: &Skill) -> DomainResult<Vec<Employee>>;
    async fn find_by_employment_date_before(&self, date: NaiveDate) -> DomainResult<Vec<Employee>>;
    async fn find_by_skill_and_employment_date_before(
        &self,
        skill: &Skill,
        date: NaiveDate,
    ) -> DomainResult<Vec<Employee>>;

    /// Persist a new employee and return it with the assigned id.
    async fn insert(&self, employee: NewEmployee) -> DomainResult<Employee>;
    /// Overwrite every field (skills included) of an existing employee.
    async fn update(&self, employee: Employee) -> DomainResult<Employee>;
    async fn delete(&self, employee: &Employee) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
}
