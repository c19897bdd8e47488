//! Application ports (hexagonal architecture boundaries)
//!
//! Store interfaces are defined in `domain`; outbound ports for
//! collaborators that are not entity stores live here.

pub mod outbound;

pub use outbound::PasswordHasher;
