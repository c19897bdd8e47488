//! Employee DTOs

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::EmployeeInput;
use crate::domain::{Employee, EmployeeType};
use crate::interfaces::http::modules::skills::SkillDto;

/// Employee type as exposed over the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmployeeTypeDto {
    Regular,
    Admin,
}

impl From<EmployeeType> for EmployeeTypeDto {
    fn from(t: EmployeeType) -> Self {
        match t {
            EmployeeType::Regular => Self::Regular,
            EmployeeType::Admin => Self::Admin,
        }
    }
}

impl From<EmployeeTypeDto> for EmployeeType {
    fn from(t: EmployeeTypeDto) -> Self {
        match t {
            EmployeeTypeDto::Regular => Self::Regular,
            EmployeeTypeDto::Admin => Self::Admin,
        }
    }
}

/// Employee API representation. The password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub employee_type: EmployeeTypeDto,
    pub skills: Vec<SkillDto>,
    pub employment_date: NaiveDate,
    /// Completed years as of today
    pub years_of_service: u32,
}

impl EmployeeDto {
    pub fn from_employee(e: Employee, today: NaiveDate) -> Self {
        Self {
            years_of_service: e.years_of_service(today),
            id: e.id,
            name: e.name,
            email: e.email,
            employee_type: e.employee_type.into(),
            skills: e.skills.into_iter().map(SkillDto::from).collect(),
            employment_date: e.employment_date,
        }
    }
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self::from_employee(e, Local::now().date_naive())
    }
}

/// Create or fully replace an employee
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "password must be 1-128 characters"))]
    pub password: String,
    #[serde(rename = "type", default = "default_type")]
    pub employee_type: EmployeeTypeDto,
    /// Unknown ids are ignored
    #[serde(default)]
    pub skill_ids: Vec<i32>,
    pub employment_date: NaiveDate,
}

fn default_type() -> EmployeeTypeDto {
    EmployeeTypeDto::Regular
}

impl From<SaveEmployeeRequest> for EmployeeInput {
    fn from(r: SaveEmployeeRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            password: r.password,
            employee_type: r.employee_type.into(),
            skill_ids: r.skill_ids,
            employment_date: r.employment_date,
        }
    }
}

/// Employee list filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilterParams {
    /// Only employees having this skill
    pub skill_id: Option<i32>,
    /// Only employees hired more than this many years ago
    pub years_of_service: Option<u32>,
}
