//! Skills module: catalogue listing and creation

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
