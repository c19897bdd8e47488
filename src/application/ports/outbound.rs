//! Outbound ports: collaborators the application delegates to
//!
//! [`PasswordHasher`] decouples the employee service from the concrete
//! hashing algorithm. The production implementation is
//! [`BcryptPasswordHasher`](crate::infrastructure::crypto::password::BcryptPasswordHasher).

use crate::domain::DomainResult;

/// One-way password encoding.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> DomainResult<String>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool>;
}
