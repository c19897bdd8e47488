//! Authentication principal built from an employee record

use std::collections::BTreeSet;

use super::{Employee, EmployeeType};

/// Identity, credentials and roles of an authenticated subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub password_hash: String,
    pub roles: BTreeSet<EmployeeType>,
}

impl Principal {
    /// The role set is exactly the employee's type.
    pub fn from_employee(username: impl Into<String>, employee: &Employee) -> Self {
        Self {
            username: username.into(),
            password_hash: employee.password.clone(),
            roles: BTreeSet::from([employee.employee_type]),
        }
    }

    pub fn has_role(&self, role: EmployeeType) -> bool {
        self.roles.contains(&role)
    }

    pub fn authorities(&self) -> Vec<&'static str> {
        self.roles.iter().map(EmployeeType::authority).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn principal_carries_single_role() {
        let employee = Employee {
            id: 3,
            name: "Boris".into(),
            email: "boris@example.com".into(),
            password: "hashed".into(),
            employee_type: EmployeeType::Admin,
            skills: vec![],
            employment_date: NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
        };

        let principal = Principal::from_employee("boris@example.com", &employee);
        assert_eq!(principal.username, "boris@example.com");
        assert_eq!(principal.password_hash, "hashed");
        assert_eq!(principal.roles, BTreeSet::from([EmployeeType::Admin]));
        assert!(principal.has_role(EmployeeType::Admin));
        assert!(!principal.has_role(EmployeeType::Regular));
        assert_eq!(principal.authorities(), vec!["ROLE_ADMIN"]);
    }
}
