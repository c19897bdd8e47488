//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Employee email
    #[validate(length(min = 1, max = 255, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: PrincipalInfo,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PrincipalInfo {
    pub username: String,
    /// Authorities, e.g. `ROLE_ADMIN`
    pub roles: Vec<String>,
}
