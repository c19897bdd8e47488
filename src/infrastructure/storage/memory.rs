//! In-memory storage implementation

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeId, EmployeeRepository, NewEmployee, Skill,
    SkillId, SkillRepository,
};

/// In-memory employee store for development and testing
pub struct InMemoryEmployeeRepository {
    employees: DashMap<EmployeeId, Employee>,
    id_counter: AtomicI32,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self {
            employees: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }

    /// Matching employees in id order, the natural order of the store.
    fn collect<F>(&self, predicate: F) -> Vec<Employee>
    where
        F: Fn(&Employee) -> bool,
    {
        let mut found: Vec<Employee> = self
            .employees
            .iter()
            .filter(|e| predicate(e.value()))
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|e| e.id);
        found
    }

    fn ensure_email_free(&self, email: &str, owner: Option<EmployeeId>) -> DomainResult<()> {
        let taken = self
            .employees
            .iter()
            .any(|e| e.email == email && Some(e.id) != owner);
        if taken {
            return Err(DomainError::Conflict(format!(
                "Email '{}' is already in use",
                email
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_all(&self) -> DomainResult<Vec<Employee>> {
        Ok(self.collect(|_| true))
    }

    async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        Ok(self.employees.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        Ok(self
            .employees
            .iter()
            .find(|e| e.email == email)
            .map(|e| e.value().clone()))
    }

    async fn find_by_skill(&self, skill: &Skill) -> DomainResult<Vec<Employee>> {
        Ok(self.collect(|e| e.has_skill(skill.id)))
    }

    async fn find_by_employment_date_before(&self, date: NaiveDate) -> DomainResult<Vec<Employee>> {
        Ok(self.collect(|e| e.employed_before(date)))
    }

    async fn find_by_skill_and_employment_date_before(
        &self,
        skill: &Skill,
        date: NaiveDate,
    ) -> DomainResult<Vec<Employee>> {
        Ok(self.collect(|e| e.has_skill(skill.id) && e.employed_before(date)))
    }

    async fn insert(&self, employee: NewEmployee) -> DomainResult<Employee> {
        self.ensure_email_free(&employee.email, None)?;

        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let employee = Employee::from_new(id, employee);
        self.employees.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: Employee) -> DomainResult<Employee> {
        if !self.employees.contains_key(&employee.id) {
            return Err(DomainError::employee_not_found(employee.id));
        }
        self.ensure_email_free(&employee.email, Some(employee.id))?;

        self.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn delete(&self, employee: &Employee) -> DomainResult<()> {
        self.employees
            .remove(&employee.id)
            .map(|_| ())
            .ok_or_else(|| DomainError::employee_not_found(employee.id))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.employees.len() as u64)
    }
}

/// In-memory skill store for development and testing
pub struct InMemorySkillRepository {
    skills: DashMap<SkillId, Skill>,
    id_counter: AtomicI32,
}

impl InMemorySkillRepository {
    pub fn new() -> Self {
        Self {
            skills: DashMap::new(),
            id_counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemorySkillRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn find_all(&self) -> DomainResult<Vec<Skill>> {
        let mut skills: Vec<Skill> = self.skills.iter().map(|s| s.value().clone()).collect();
        skills.sort_by_key(|s| s.id);
        Ok(skills)
    }

    async fn find_by_id(&self, id: SkillId) -> DomainResult<Option<Skill>> {
        Ok(self.skills.get(&id).map(|s| s.value().clone()))
    }

    async fn find_by_ids(&self, ids: &[SkillId]) -> DomainResult<Vec<Skill>> {
        let unique: BTreeSet<SkillId> = ids.iter().copied().collect();
        Ok(unique
            .into_iter()
            .filter_map(|id| self.skills.get(&id).map(|s| s.value().clone()))
            .collect())
    }

    async fn insert(&self, name: String) -> DomainResult<Skill> {
        if self.skills.iter().any(|s| s.name == name) {
            return Err(DomainError::Conflict(format!("Skill '{}' already exists", name)));
        }

        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let skill = Skill::new(id, name);
        self.skills.insert(id, skill.clone());
        Ok(skill)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.skills.len() as u64)
    }
}
