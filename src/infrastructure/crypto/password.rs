//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::application::ports::PasswordHasher;
use crate::domain::DomainResult;
use crate::shared::InfraError;

/// bcrypt-backed [`PasswordHasher`]
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> DomainResult<String> {
        Ok(hash(plaintext, self.cost).map_err(InfraError::from)?)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> DomainResult<bool> {
        Ok(verify(plaintext, hash).map_err(InfraError::from)?)
    }
}
