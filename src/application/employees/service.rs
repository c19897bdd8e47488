//! Employee service
//!
//! All employee-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::application::ports::PasswordHasher;
use crate::domain::{
    service_cutoff, DomainError, DomainResult, Employee, EmployeeId, EmployeeRepository,
    EmployeeType, NewEmployee, Principal, SkillId, SkillRepository,
};

/// Fields supplied when creating or fully replacing an employee.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    /// Plaintext, hashed by the service before it reaches the store
    pub password: String,
    pub employee_type: EmployeeType,
    pub skill_ids: Vec<SkillId>,
    pub employment_date: NaiveDate,
}

/// Create, update, delete, list, filter and
/// principal lookup over the employee and skill stores.
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    skills: Arc<dyn SkillRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl EmployeeService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        skills: Arc<dyn SkillRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            employees,
            skills,
            password_hasher,
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_all(&self) -> DomainResult<Vec<Employee>> {
        self.employees.find_all().await
    }

    pub async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::employee_not_found(id))
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.employees.count().await
    }

    /// Filter by skill and/or minimum years of service, counted from today.
    pub async fn filter(
        &self,
        skill_id: Option<SkillId>,
        years_of_service: Option<u32>,
    ) -> DomainResult<Vec<Employee>> {
        self.filter_as_of(skill_id, years_of_service, Local::now().date_naive())
            .await
    }

    /// Same as [`filter`](Self::filter) with an explicit "today".
    ///
    /// An unknown skill id fails before any other criterion is looked at.
    pub async fn filter_as_of(
        &self,
        skill_id: Option<SkillId>,
        years_of_service: Option<u32>,
        today: NaiveDate,
    ) -> DomainResult<Vec<Employee>> {
        let skill = match skill_id {
            Some(id) => Some(
                self.skills
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::skill_not_found(id))?,
            ),
            None => None,
        };

        debug!(?skill_id, ?years_of_service, %today, "Filtering employees");

        match (skill, years_of_service) {
            (Some(skill), Some(years)) => {
                let cutoff = service_cutoff(today, years);
                self.employees
                    .find_by_skill_and_employment_date_before(&skill, cutoff)
                    .await
            }
            (Some(skill), None) => self.employees.find_by_skill(&skill).await,
            (None, Some(years)) => {
                let cutoff = service_cutoff(today, years);
                self.employees.find_by_employment_date_before(cutoff).await
            }
            (None, None) => self.list_all().await,
        }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create an employee. Unknown skill ids are dropped, not rejected.
    pub async fn create(&self, input: EmployeeInput) -> DomainResult<Employee> {
        if self.employees.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email '{}' is already in use",
                input.email
            )));
        }

        let skills = self.skills.find_by_ids(&input.skill_ids).await?;
        let password = self.password_hasher.hash(&input.password)?;

        let employee = self
            .employees
            .insert(NewEmployee {
                name: input.name,
                email: input.email,
                password,
                employee_type: input.employee_type,
                skills,
                employment_date: input.employment_date,
            })
            .await?;

        info!(
            employee_id = employee.id,
            email = %employee.email,
            skills = employee.skills.len(),
            "Employee created"
        );
        metrics::counter!("employee_mutations_total", "operation" => "create").increment(1);
        Ok(employee)
    }

    /// Replace every field of an existing employee, password and skills included.
    pub async fn update(&self, id: EmployeeId, input: EmployeeInput) -> DomainResult<Employee> {
        let mut employee = self.find_by_id(id).await?;

        if let Some(other) = self.employees.find_by_email(&input.email).await? {
            if other.id != id {
                return Err(DomainError::Conflict(format!(
                    "Email '{}' is already in use",
                    input.email
                )));
            }
        }

        let skills = self.skills.find_by_ids(&input.skill_ids).await?;
        let password = self.password_hasher.hash(&input.password)?;

        employee.name = input.name;
        employee.email = input.email;
        employee.password = password;
        employee.employee_type = input.employee_type;
        employee.skills = skills;
        employee.employment_date = input.employment_date;

        let employee = self.employees.update(employee).await?;

        info!(employee_id = id, "Employee updated");
        metrics::counter!("employee_mutations_total", "operation" => "update").increment(1);
        Ok(employee)
    }

    /// Delete an employee and return the record as it was before removal.
    pub async fn delete(&self, id: EmployeeId) -> DomainResult<Employee> {
        let employee = self.find_by_id(id).await?;
        self.employees.delete(&employee).await?;

        info!(employee_id = id, "Employee deleted");
        metrics::counter!("employee_mutations_total", "operation" => "delete").increment(1);
        Ok(employee)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Adapt the employee whose email equals `username` into a principal.
    pub async fn load_principal_by_username(&self, username: &str) -> DomainResult<Principal> {
        let employee = self
            .employees
            .find_by_email(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        Ok(Principal::from_employee(username, &employee))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::infrastructure::crypto::password::BcryptPasswordHasher;
    use crate::infrastructure::storage::{InMemoryEmployeeRepository, InMemorySkillRepository};

    struct Fixture {
        service: EmployeeService,
        hasher: Arc<BcryptPasswordHasher>,
        rust: SkillId,
        sql: SkillId,
        java: SkillId,
    }

    async fn fixture() -> Fixture {
        let skills = Arc::new(InMemorySkillRepository::new());
        let rust = skills.insert("Rust".into()).await.unwrap().id;
        let sql = skills.insert("SQL".into()).await.unwrap().id;
        let java = skills.insert("Java".into()).await.unwrap().id;

        let hasher = Arc::new(BcryptPasswordHasher::new(4));
        let service = EmployeeService::new(
            Arc::new(InMemoryEmployeeRepository::new()),
            skills,
            hasher.clone(),
        );

        Fixture {
            service,
            hasher,
            rust,
            sql,
            java,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(email: &str, skill_ids: Vec<SkillId>, employment_date: NaiveDate) -> EmployeeInput {
        EmployeeInput {
            name: "Employee".into(),
            email: email.into(),
            password: "s3cret-pass".into(),
            employee_type: EmployeeType::Regular,
            skill_ids,
            employment_date,
        }
    }

    fn ids(employees: &[Employee]) -> HashSet<EmployeeId> {
        employees.iter().map(|e| e.id).collect()
    }

    fn skill_ids(employee: &Employee) -> BTreeSet<SkillId> {
        employee.skills.iter().map(|s| s.id).collect()
    }

    #[tokio::test]
    async fn create_then_find_returns_supplied_fields_with_hashed_password() {
        let f = fixture().await;
        let created = f
            .service
            .create(EmployeeInput {
                name: "Ana".into(),
                email: "ana@example.com".into(),
                password: "plaintext".into(),
                employee_type: EmployeeType::Admin,
                skill_ids: vec![f.rust, f.sql],
                employment_date: date(2010, 1, 1),
            })
            .await
            .unwrap();

        let found = f.service.find_by_id(created.id).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.name, "Ana");
        assert_eq!(found.email, "ana@example.com");
        assert_eq!(found.employee_type, EmployeeType::Admin);
        assert_eq!(found.employment_date, date(2010, 1, 1));
        assert_eq!(skill_ids(&found), BTreeSet::from([f.rust, f.sql]));

        assert_ne!(found.password, "plaintext");
        assert!(f.hasher.verify("plaintext", &found.password).unwrap());
    }

    #[tokio::test]
    async fn create_drops_unknown_skill_ids() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("a@example.com", vec![f.rust, 999], date(2020, 5, 1)))
            .await
            .unwrap();

        assert_eq!(skill_ids(&created), BTreeSet::from([f.rust]));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let f = fixture().await;
        f.service
            .create(input("dup@example.com", vec![], date(2020, 5, 1)))
            .await
            .unwrap();

        let err = f
            .service
            .create(input("dup@example.com", vec![], date(2021, 5, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_unknown_id_is_not_found() {
        let f = fixture().await;
        let err = f.service.find_by_id(404).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Employee", .. }));
    }

    #[tokio::test]
    async fn update_fully_replaces_fields() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("old@example.com", vec![f.rust, f.sql], date(2010, 1, 1)))
            .await
            .unwrap();

        f.service
            .update(
                created.id,
                EmployeeInput {
                    name: "Renamed".into(),
                    email: "new@example.com".into(),
                    password: "other-pass".into(),
                    employee_type: EmployeeType::Admin,
                    skill_ids: vec![f.java],
                    employment_date: date(2018, 7, 9),
                },
            )
            .await
            .unwrap();

        let found = f.service.find_by_id(created.id).await.unwrap();
        assert_eq!(found.name, "Renamed");
        assert_eq!(found.email, "new@example.com");
        assert_eq!(found.employee_type, EmployeeType::Admin);
        assert_eq!(found.employment_date, date(2018, 7, 9));
        assert_eq!(skill_ids(&found), BTreeSet::from([f.java]));
        assert!(f.hasher.verify("other-pass", &found.password).unwrap());
        assert!(!f.hasher.verify("s3cret-pass", &found.password).unwrap());
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let f = fixture().await;
        let err = f
            .service
            .update(77, input("x@example.com", vec![], date(2020, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Employee", .. }));
    }

    #[tokio::test]
    async fn update_may_keep_own_email_but_not_take_another() {
        let f = fixture().await;
        let a = f
            .service
            .create(input("a@example.com", vec![], date(2020, 1, 1)))
            .await
            .unwrap();
        f.service
            .create(input("b@example.com", vec![], date(2020, 1, 1)))
            .await
            .unwrap();

        f.service
            .update(a.id, input("a@example.com", vec![], date(2019, 1, 1)))
            .await
            .unwrap();

        let err = f
            .service
            .update(a.id, input("b@example.com", vec![], date(2019, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_returns_snapshot_and_removes() {
        let f = fixture().await;
        let created = f
            .service
            .create(input("gone@example.com", vec![f.sql], date(2012, 2, 2)))
            .await
            .unwrap();

        let deleted = f.service.delete(created.id).await.unwrap();
        assert_eq!(deleted, created);

        let err = f.service.find_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Employee", .. }));

        let err = f.service.delete(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Employee", .. }));
    }

    #[tokio::test]
    async fn filter_by_skill_only() {
        let f = fixture().await;
        let e1 = f
            .service
            .create(input("e1@example.com", vec![f.rust, f.sql], date(2010, 1, 1)))
            .await
            .unwrap();
        let e2 = f
            .service
            .create(input("e2@example.com", vec![f.rust], date(2023, 1, 1)))
            .await
            .unwrap();
        f.service
            .create(input("e3@example.com", vec![f.java], date(2000, 1, 1)))
            .await
            .unwrap();

        let found = f.service.filter(Some(f.rust), None).await.unwrap();
        assert_eq!(ids(&found), HashSet::from([e1.id, e2.id]));
    }

    #[tokio::test]
    async fn filter_by_years_excludes_hire_on_cutoff() {
        let f = fixture().await;
        let today = date(2024, 6, 15);
        let before = f
            .service
            .create(input("before@example.com", vec![], date(2014, 6, 14)))
            .await
            .unwrap();
        f.service
            .create(input("on@example.com", vec![], date(2014, 6, 15)))
            .await
            .unwrap();
        f.service
            .create(input("after@example.com", vec![], date(2014, 6, 16)))
            .await
            .unwrap();

        let found = f.service.filter_as_of(None, Some(10), today).await.unwrap();
        assert_eq!(ids(&found), HashSet::from([before.id]));
    }

    #[tokio::test]
    async fn filter_by_skill_and_years_is_intersection() {
        let f = fixture().await;
        let today = date(2024, 1, 1);
        let both = f
            .service
            .create(input("both@example.com", vec![f.rust], date(2005, 1, 1)))
            .await
            .unwrap();
        f.service
            .create(input("skill-only@example.com", vec![f.rust], date(2022, 1, 1)))
            .await
            .unwrap();
        f.service
            .create(input("years-only@example.com", vec![f.java], date(2001, 1, 1)))
            .await
            .unwrap();

        let by_skill = ids(&f.service.filter_as_of(Some(f.rust), None, today).await.unwrap());
        let by_years = ids(&f.service.filter_as_of(None, Some(5), today).await.unwrap());
        let combined = ids(&f.service.filter_as_of(Some(f.rust), Some(5), today).await.unwrap());

        assert_eq!(combined, HashSet::from([both.id]));
        assert_eq!(combined, &by_skill & &by_years);
    }

    #[tokio::test]
    async fn filter_without_criteria_lists_all() {
        let f = fixture().await;
        for (i, skill) in [f.rust, f.sql, f.java].into_iter().enumerate() {
            f.service
                .create(input(&format!("e{}@example.com", i), vec![skill], date(2015, 1, 1)))
                .await
                .unwrap();
        }

        let filtered = f.service.filter(None, None).await.unwrap();
        let all = f.service.list_all().await.unwrap();
        assert_eq!(filtered.len(), 3);
        assert_eq!(ids(&filtered), ids(&all));
    }

    #[tokio::test]
    async fn filter_with_unknown_skill_is_not_found() {
        let f = fixture().await;
        for years in [None, Some(3)] {
            let err = f.service.filter(Some(12345), years).await.unwrap_err();
            assert!(matches!(err, DomainError::NotFound { entity: "Skill", .. }));
        }
    }

    #[tokio::test]
    async fn filter_scenario_with_relative_today() {
        let f = fixture().await;
        let e1 = f
            .service
            .create(input("e1@example.com", vec![f.rust, f.sql], date(2010, 1, 1)))
            .await
            .unwrap();

        let ten_years = f.service.filter(Some(f.rust), Some(10)).await.unwrap();
        assert!(ids(&ten_years).contains(&e1.id));

        let century = f.service.filter(Some(f.rust), Some(100)).await.unwrap();
        assert!(!ids(&century).contains(&e1.id));
    }

    #[tokio::test]
    async fn load_principal_for_known_email() {
        let f = fixture().await;
        let created = f
            .service
            .create(EmployeeInput {
                employee_type: EmployeeType::Admin,
                ..input("boss@example.com", vec![], date(2011, 1, 1))
            })
            .await
            .unwrap();

        let principal = f
            .service
            .load_principal_by_username("boss@example.com")
            .await
            .unwrap();
        assert_eq!(principal.username, "boss@example.com");
        assert_eq!(principal.password_hash, created.password);
        assert_eq!(principal.roles, BTreeSet::from([EmployeeType::Admin]));
    }

    #[tokio::test]
    async fn load_principal_for_unknown_email_fails() {
        let f = fixture().await;
        let err = f
            .service
            .load_principal_by_username("nobody@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(ref u) if u == "nobody@example.com"));
    }
}
