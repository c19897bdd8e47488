pub mod auth;
pub mod employees;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod skills;
