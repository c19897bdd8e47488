//! Authentication service
//!
//! Turns an email/password pair into a signed JWT. Principal lookup is
//! delegated to [`EmployeeService`], password checks to the [`PasswordHasher`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::employees::EmployeeService;
use crate::application::ports::PasswordHasher;
use crate::domain::{DomainError, DomainResult, Principal};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::shared::InfraError;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub principal: Principal,
}

pub struct AuthService {
    employees: Arc<EmployeeService>,
    password_hasher: Arc<dyn PasswordHasher>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(
        employees: Arc<EmployeeService>,
        password_hasher: Arc<dyn PasswordHasher>,
        jwt_config: JwtConfig,
    ) -> Self {
        Self {
            employees,
            password_hasher,
            jwt_config,
        }
    }

    /// Authenticate by email + password and return a JWT.
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let principal = match self.employees.load_principal_by_username(username).await {
            Ok(principal) => principal,
            Err(DomainError::UserNotFound(_)) => {
                warn!(username, "Login attempt for unknown user");
                metrics::counter!("auth_logins_total", "outcome" => "failure").increment(1);
                return Err(DomainError::Unauthorized("Invalid credentials".into()));
            }
            Err(e) => return Err(e),
        };

        let valid = self
            .password_hasher
            .verify(password, &principal.password_hash)
            .unwrap_or(false);
        if !valid {
            warn!(username, "Login attempt with invalid password");
            metrics::counter!("auth_logins_total", "outcome" => "failure").increment(1);
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let token = create_token(&principal, &self.jwt_config).map_err(InfraError::from)?;

        info!(username, roles = ?principal.authorities(), "Employee logged in");
        metrics::counter!("auth_logins_total", "outcome" => "success").increment(1);
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            principal,
        })
    }
}
