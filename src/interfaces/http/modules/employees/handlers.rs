//! Employee API handlers
//!
//! Reads are open to every authenticated employee; mutations are
//! guarded by `require_admin` in the router.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{EmployeeDto, EmployeeFilterParams, SaveEmployeeRequest};
use crate::application::EmployeeService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct EmployeeHandlerState {
    pub employee_service: Arc<EmployeeService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(EmployeeFilterParams),
    responses(
        (status = 200, description = "Matching employees", body = ApiResponse<Vec<EmployeeDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown skill")
    )
)]
pub async fn list_employees(
    State(state): State<EmployeeHandlerState>,
    Query(params): Query<EmployeeFilterParams>,
) -> Result<Json<ApiResponse<Vec<EmployeeDto>>>, ApiError> {
    let employees = state
        .employee_service
        .filter(params.skill_id, params.years_of_service)
        .await?;

    Ok(Json(ApiResponse::success(
        employees.into_iter().map(EmployeeDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = ApiResponse<EmployeeDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let employee = state.employee_service.find_by_id(id).await?;
    Ok(Json(ApiResponse::success(employee.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = SaveEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeDto>),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_employee(
    State(state): State<EmployeeHandlerState>,
    ValidatedJson(request): ValidatedJson<SaveEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeDto>>), ApiError> {
    let employee = state.employee_service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(employee.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = SaveEmployeeRequest,
    responses(
        (status = 200, description = "Employee replaced", body = ApiResponse<EmployeeDto>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<SaveEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let employee = state.employee_service.update(id, request.into()).await?;
    Ok(Json(ApiResponse::success(employee.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Deleted employee", body = ApiResponse<EmployeeDto>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_employee(
    State(state): State<EmployeeHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let employee = state.employee_service.delete(id).await?;
    Ok(Json(ApiResponse::success(employee.into())))
}
