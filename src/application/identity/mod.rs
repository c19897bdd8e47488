//! Identity module: login on top of employee principals

pub mod service;

pub use service::{AuthResult, AuthService};
