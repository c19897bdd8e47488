//! Skill API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateSkillRequest, SkillDto};
use crate::application::SkillService;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct SkillHandlerState {
    pub skill_service: Arc<SkillService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/skills",
    tag = "Skills",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All skills", body = ApiResponse<Vec<SkillDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_skills(
    State(state): State<SkillHandlerState>,
) -> Result<Json<ApiResponse<Vec<SkillDto>>>, ApiError> {
    let skills = state.skill_service.list_all().await?;
    Ok(Json(ApiResponse::success(
        skills.into_iter().map(SkillDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/skills/{id}",
    tag = "Skills",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Skill ID")),
    responses(
        (status = 200, description = "Skill details", body = ApiResponse<SkillDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_skill(
    State(state): State<SkillHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SkillDto>>, ApiError> {
    let skill = state.skill_service.find_by_id(id).await?;
    Ok(Json(ApiResponse::success(skill.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/skills",
    tag = "Skills",
    security(("bearer_auth" = [])),
    request_body = CreateSkillRequest,
    responses(
        (status = 201, description = "Skill created", body = ApiResponse<SkillDto>),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Skill already exists")
    )
)]
pub async fn create_skill(
    State(state): State<SkillHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateSkillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SkillDto>>), ApiError> {
    let skill = state.skill_service.create(&request.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(skill.into()))))
}
