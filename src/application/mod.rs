//! Application layer: use cases orchestrating the domain ports

pub mod employees;
pub mod identity;
pub mod ports;
pub mod skills;

pub use employees::{EmployeeInput, EmployeeService};
pub use identity::{AuthResult, AuthService};
pub use ports::PasswordHasher;
pub use skills::SkillService;
