use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn employee_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Employee",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn skill_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Skill",
            field: "id",
            value: id.to_string(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl From<InfraError> for DomainError {
    fn from(e: InfraError) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let e = DomainError::employee_not_found(42);
        assert_eq!(e.to_string(), "Not found: Employee with id=42");

        let e = DomainError::skill_not_found(7);
        assert_eq!(e.to_string(), "Not found: Skill with id=7");
    }

    #[test]
    fn infra_errors_become_storage_errors() {
        let infra = InfraError::Database(sea_orm::DbErr::Custom("boom".into()));
        let domain: DomainError = infra.into();
        assert!(matches!(domain, DomainError::Storage(ref msg) if msg.contains("boom")));
    }
}
