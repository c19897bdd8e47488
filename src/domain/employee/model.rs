//! Employee domain entity

use chrono::{Months, NaiveDate};

use crate::domain::{Skill, SkillId};

pub type EmployeeId = i32;

/// Employee type. Doubles as the authorization role of the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmployeeType {
    Regular,
    Admin,
}

impl EmployeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Admin => "ADMIN",
        }
    }

    /// Authority string granted to an authenticated employee of this type.
    pub fn authority(&self) -> &'static str {
        match self {
            Self::Regular => "ROLE_REGULAR",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    pub fn from_authority(authority: &str) -> Option<Self> {
        match authority {
            "ROLE_REGULAR" => Some(Self::Regular),
            "ROLE_ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for EmployeeType {
    fn default() -> Self {
        Self::Regular
    }
}

impl std::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employee fields before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    /// Already hashed
    pub password: String,
    pub employee_type: EmployeeType,
    pub skills: Vec<Skill>,
    pub employment_date: NaiveDate,
}

/// Persisted employee
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Login identifier, unique across employees
    pub email: String,
    /// Password hash, never the plaintext
    pub password: String,
    pub employee_type: EmployeeType,
    pub skills: Vec<Skill>,
    pub employment_date: NaiveDate,
}

impl Employee {
    pub fn from_new(id: EmployeeId, new: NewEmployee) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            password: new.password,
            employee_type: new.employee_type,
            skills: new.skills,
            employment_date: new.employment_date,
        }
    }

    pub fn has_skill(&self, skill_id: SkillId) -> bool {
        self.skills.iter().any(|s| s.id == skill_id)
    }

    /// Strictly before: an employee hired on `date` is not included.
    pub fn employed_before(&self, date: NaiveDate) -> bool {
        self.employment_date < date
    }

    /// Completed years of service as of `today`; zero for future hires.
    pub fn years_of_service(&self, today: NaiveDate) -> u32 {
        today.years_since(self.employment_date).unwrap_or(0)
    }

    pub fn skill_ids(&self) -> Vec<SkillId> {
        self.skills.iter().map(|s| s.id).collect()
    }
}

/// Employment date cutoff for a years-of-service filter.
///
/// Feb 29 maps to Feb 28 when the target year is not a leap year.
pub fn service_cutoff(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_employee() -> Employee {
        Employee {
            id: 1,
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "$2b$04$hash".into(),
            employee_type: EmployeeType::Regular,
            skills: vec![Skill::new(1, "Rust"), Skill::new(2, "SQL")],
            employment_date: date(2010, 1, 1),
        }
    }

    #[test]
    fn authority_round_trips() {
        for t in [EmployeeType::Regular, EmployeeType::Admin] {
            assert_eq!(EmployeeType::from_authority(t.authority()), Some(t));
        }
        assert_eq!(EmployeeType::from_authority("ROLE_ROOT"), None);
    }

    #[test]
    fn cutoff_subtracts_whole_years() {
        assert_eq!(service_cutoff(date(2024, 6, 15), 10), date(2014, 6, 15));
        assert_eq!(service_cutoff(date(2024, 6, 15), 0), date(2024, 6, 15));
    }

    #[test]
    fn cutoff_from_leap_day_clamps_to_end_of_february() {
        assert_eq!(service_cutoff(date(2024, 2, 29), 1), date(2023, 2, 28));
        assert_eq!(service_cutoff(date(2024, 2, 29), 4), date(2020, 2, 29));
    }

    #[test]
    fn cutoff_saturates_for_absurd_years() {
        assert_eq!(service_cutoff(date(2024, 1, 1), u32::MAX), NaiveDate::MIN);
    }

    #[test]
    fn employed_before_is_strict() {
        let e = sample_employee();
        assert!(e.employed_before(date(2010, 1, 2)));
        assert!(!e.employed_before(date(2010, 1, 1)));
    }

    #[test]
    fn years_of_service_counts_completed_years() {
        let e = sample_employee();
        assert_eq!(e.years_of_service(date(2019, 12, 31)), 9);
        assert_eq!(e.years_of_service(date(2020, 1, 1)), 10);
        assert_eq!(e.years_of_service(date(2009, 1, 1)), 0);
    }

    #[test]
    fn has_skill_checks_ids() {
        let e = sample_employee();
        assert!(e.has_skill(2));
        assert!(!e.has_skill(3));
        assert_eq!(e.skill_ids(), vec![1, 2]);
    }
}
