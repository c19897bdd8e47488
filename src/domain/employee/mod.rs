//! Employee aggregate
//!
//! Contains the Employee entity, its role enumeration, and repository interface.

pub mod model;
pub mod repository;

pub use model::{service_cutoff, Employee, EmployeeId, EmployeeType, NewEmployee};
pub use repository::EmployeeRepository;
