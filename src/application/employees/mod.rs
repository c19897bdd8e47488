//! Employee management: CRUD, filtering and principal lookup

pub mod service;

pub use service::{EmployeeInput, EmployeeService};
