//! # Employee Registry
//!
//! Employee and skill management service with JWT authentication.
//!
//! ## Architecture
//!
//! - **domain**: entities (employee, skill, principal) and store traits
//! - **application**: employee, skill and authentication services
//! - **infrastructure**: SeaORM and in-memory stores, bcrypt, JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
