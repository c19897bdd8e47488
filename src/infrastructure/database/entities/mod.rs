//! Database entities module

pub mod employee;
pub mod employee_skill;
pub mod skill;

pub use employee::Entity as Employee;
pub use employee_skill::Entity as EmployeeSkill;
pub use skill::Entity as Skill;
