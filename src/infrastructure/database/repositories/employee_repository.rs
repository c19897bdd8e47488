use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait, Unchanged,
};

use super::skill_repository::skill_model_to_domain;
use super::{db_err, is_unique_violation};
use crate::domain::{
    DomainError, DomainResult, Employee, EmployeeId, EmployeeRepository, EmployeeType,
    NewEmployee, Skill,
};
use crate::infrastructure::database::entities::{employee, employee_skill, skill};

pub struct SeaOrmEmployeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Run `query` and attach each employee's skills.
    async fn load(&self, query: Select<employee::Entity>) -> DomainResult<Vec<Employee>> {
        let rows = query
            .order_by_asc(employee::Column::Id)
            .find_with_related(skill::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, skills)| employee_model_to_domain(model, skills))
            .collect())
    }

    async fn employee_ids_with_skill(&self, skill: &Skill) -> DomainResult<Vec<EmployeeId>> {
        let links = employee_skill::Entity::find()
            .filter(employee_skill::Column::SkillId.eq(skill.id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(links.into_iter().map(|l| l.employee_id).collect())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_type_to_domain(t: employee::EmployeeType) -> EmployeeType {
    match t {
        employee::EmployeeType::Regular => EmployeeType::Regular,
        employee::EmployeeType::Admin => EmployeeType::Admin,
    }
}

fn domain_type_to_entity(t: EmployeeType) -> employee::EmployeeType {
    match t {
        EmployeeType::Regular => employee::EmployeeType::Regular,
        EmployeeType::Admin => employee::EmployeeType::Admin,
    }
}

fn employee_model_to_domain(model: employee::Model, skills: Vec<skill::Model>) -> Employee {
    Employee {
        id: model.id,
        name: model.name,
        email: model.email,
        password: model.password,
        employee_type: entity_type_to_domain(model.employee_type),
        skills: skills.into_iter().map(skill_model_to_domain).collect(),
        employment_date: model.employment_date,
    }
}

fn write_err(e: DbErr) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::Conflict("Email is already in use".to_string())
    } else {
        db_err(e)
    }
}

/// Replace the skill links of one employee inside the caller's transaction.
async fn replace_skill_links<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    skills: &[Skill],
) -> Result<(), DbErr> {
    employee_skill::Entity::delete_many()
        .filter(employee_skill::Column::EmployeeId.eq(employee_id))
        .exec(conn)
        .await?;

    if skills.is_empty() {
        return Ok(());
    }

    let links = skills.iter().map(|s| employee_skill::ActiveModel {
        employee_id: Set(employee_id),
        skill_id: Set(s.id),
    });
    employee_skill::Entity::insert_many(links).exec(conn).await?;

    Ok(())
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_all(&self) -> DomainResult<Vec<Employee>> {
        self.load(employee::Entity::find()).await
    }

    async fn find_by_id(&self, id: EmployeeId) -> DomainResult<Option<Employee>> {
        let found = self
            .load(employee::Entity::find().filter(employee::Column::Id.eq(id)))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Employee>> {
        let found = self
            .load(employee::Entity::find().filter(employee::Column::Email.eq(email)))
            .await?;
        Ok(found.into_iter().next())
    }

    async fn find_by_skill(&self, skill: &Skill) -> DomainResult<Vec<Employee>> {
        let ids = self.employee_ids_with_skill(skill).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.load(employee::Entity::find().filter(employee::Column::Id.is_in(ids)))
            .await
    }

    async fn find_by_employment_date_before(&self, date: NaiveDate) -> DomainResult<Vec<Employee>> {
        self.load(employee::Entity::find().filter(employee::Column::EmploymentDate.lt(date)))
            .await
    }

    async fn find_by_skill_and_employment_date_before(
        &self,
        skill: &Skill,
        date: NaiveDate,
    ) -> DomainResult<Vec<Employee>> {
        let ids = self.employee_ids_with_skill(skill).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.load(
            employee::Entity::find()
                .filter(employee::Column::Id.is_in(ids))
                .filter(employee::Column::EmploymentDate.lt(date)),
        )
        .await
    }

    async fn insert(&self, new: NewEmployee) -> DomainResult<Employee> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = employee::ActiveModel {
            id: NotSet,
            name: Set(new.name.clone()),
            email: Set(new.email.clone()),
            password: Set(new.password.clone()),
            employee_type: Set(domain_type_to_entity(new.employee_type)),
            employment_date: Set(new.employment_date),
        }
        .insert(&txn)
        .await
        .map_err(write_err)?;

        replace_skill_links(&txn, model.id, &new.skills)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(Employee::from_new(model.id, new))
    }

    async fn update(&self, employee: Employee) -> DomainResult<Employee> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let result = employee::ActiveModel {
            id: Unchanged(employee.id),
            name: Set(employee.name.clone()),
            email: Set(employee.email.clone()),
            password: Set(employee.password.clone()),
            employee_type: Set(domain_type_to_entity(employee.employee_type)),
            employment_date: Set(employee.employment_date),
        }
        .update(&txn)
        .await;

        match result {
            Ok(_) => {}
            Err(DbErr::RecordNotUpdated) => {
                return Err(DomainError::employee_not_found(employee.id));
            }
            Err(e) => return Err(write_err(e)),
        }

        replace_skill_links(&txn, employee.id, &employee.skills)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(employee)
    }

    async fn delete(&self, employee: &Employee) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        employee_skill::Entity::delete_many()
            .filter(employee_skill::Column::EmployeeId.eq(employee.id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = employee::Entity::delete_by_id(employee.id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::employee_not_found(employee.id));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        employee::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::SkillRepository;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::database::SeaOrmSkillRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_employee(email: &str, skills: Vec<Skill>, hired: NaiveDate) -> NewEmployee {
        NewEmployee {
            name: "Test".into(),
            email: email.into(),
            password: "$2b$04$hash".into(),
            employee_type: EmployeeType::Regular,
            skills,
            employment_date: hired,
        }
    }

    async fn setup() -> (SeaOrmEmployeeRepository, Skill, Skill) {
        let db = test_database().await;
        let skills = SeaOrmSkillRepository::new(db.clone());
        let rust = skills.insert("Rust".into()).await.unwrap();
        let sql = skills.insert("SQL".into()).await.unwrap();
        (SeaOrmEmployeeRepository::new(db), rust, sql)
    }

    fn ids(employees: &[Employee]) -> BTreeSet<EmployeeId> {
        employees.iter().map(|e| e.id).collect()
    }

    #[tokio::test]
    async fn insert_round_trips_with_skills() {
        let (repo, rust, sql) = setup().await;
        let created = repo
            .insert(new_employee("a@x.io", vec![rust.clone(), sql.clone()], date(2010, 1, 1)))
            .await
            .unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.email, "a@x.io");
        assert_eq!(found.employment_date, date(2010, 1, 1));
        assert_eq!(found.skills.len(), 2);
        assert!(found.has_skill(rust.id) && found.has_skill(sql.id));

        let by_email = repo.find_by_email("a@x.io").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert!(repo.find_by_email("nobody@x.io").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn employee_without_skills_is_listed() {
        let (repo, _, _) = setup().await;
        let created = repo
            .insert(new_employee("solo@x.io", vec![], date(2015, 5, 5)))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert!(all[0].skills.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (repo, _, _) = setup().await;
        repo.insert(new_employee("a@x.io", vec![], date(2010, 1, 1)))
            .await
            .unwrap();
        let err = repo
            .insert(new_employee("a@x.io", vec![], date(2011, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_skill_set() {
        let (repo, rust, sql) = setup().await;
        let mut employee = repo
            .insert(new_employee("a@x.io", vec![rust.clone()], date(2010, 1, 1)))
            .await
            .unwrap();

        employee.name = "Changed".into();
        employee.skills = vec![sql.clone()];
        employee.employment_date = date(2012, 3, 4);
        repo.update(employee.clone()).await.unwrap();

        let found = repo.find_by_id(employee.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Changed");
        assert_eq!(found.skills, vec![sql]);
        assert_eq!(found.employment_date, date(2012, 3, 4));
    }

    #[tokio::test]
    async fn update_missing_employee_is_not_found() {
        let (repo, _, _) = setup().await;
        let ghost = Employee::from_new(99, new_employee("ghost@x.io", vec![], date(2010, 1, 1)));
        let err = repo.update(ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn finders_by_skill_and_date() {
        let (repo, rust, sql) = setup().await;
        let old_rust = repo
            .insert(new_employee("old@x.io", vec![rust.clone()], date(2005, 1, 1)))
            .await
            .unwrap();
        let new_rust = repo
            .insert(new_employee("new@x.io", vec![rust.clone(), sql.clone()], date(2022, 1, 1)))
            .await
            .unwrap();
        let cutoff_day = repo
            .insert(new_employee("cutoff@x.io", vec![sql.clone()], date(2014, 1, 1)))
            .await
            .unwrap();

        let by_skill = repo.find_by_skill(&rust).await.unwrap();
        assert_eq!(ids(&by_skill), BTreeSet::from([old_rust.id, new_rust.id]));
        // Related skills are the full set, not only the filtered one
        let new_rust_loaded = by_skill.iter().find(|e| e.id == new_rust.id).unwrap();
        assert_eq!(new_rust_loaded.skills.len(), 2);

        let before = repo
            .find_by_employment_date_before(date(2014, 1, 1))
            .await
            .unwrap();
        assert_eq!(ids(&before), BTreeSet::from([old_rust.id]));
        assert!(!ids(&before).contains(&cutoff_day.id));

        let both = repo
            .find_by_skill_and_employment_date_before(&sql, date(2015, 1, 1))
            .await
            .unwrap();
        assert_eq!(ids(&both), BTreeSet::from([cutoff_day.id]));
    }

    #[tokio::test]
    async fn delete_removes_employee_and_links() {
        let (repo, rust, _) = setup().await;
        let employee = repo
            .insert(new_employee("a@x.io", vec![rust.clone()], date(2010, 1, 1)))
            .await
            .unwrap();

        repo.delete(&employee).await.unwrap();
        assert!(repo.find_by_id(employee.id).await.unwrap().is_none());
        assert!(repo.find_by_skill(&rust).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete(&employee).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
