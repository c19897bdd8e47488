//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, EmployeeService, SkillService};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, employees, health, metrics, skills};

/// Everything the HTTP layer needs, assembled in `main`.
#[derive(Clone)]
pub struct ApiContext {
    pub employee_service: Arc<EmployeeService>,
    pub skill_service: Arc<SkillService>,
    pub auth_service: Arc<AuthService>,
    pub jwt_config: JwtConfig,
    /// `None` when running on in-memory stores
    pub db: Option<DatabaseConnection>,
    /// `None` disables `GET /metrics`
    pub prometheus: Option<PrometheusHandle>,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::get_current_user,
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        skills::list_skills,
        skills::get_skill,
        skills::create_skill,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::PrincipalInfo,
            employees::EmployeeDto,
            employees::EmployeeTypeDto,
            employees::SaveEmployeeRequest,
            skills::SkillDto,
            skills::CreateSkillRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "Login by email and password, current principal"),
        (name = "Employees", description = "Employee CRUD and filtering by skill and years of service"),
        (name = "Skills", description = "Skill catalogue"),
    ),
    info(
        title = "Employee Registry API",
        version = "1.0.0",
        description = "REST API for managing employees and their skills"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        jwt_config: ctx.jwt_config.clone(),
    };
    let admin_only = middleware::from_fn(require_admin);

    let employee_state = employees::EmployeeHandlerState {
        employee_service: ctx.employee_service.clone(),
    };
    let skill_state = skills::SkillHandlerState {
        skill_service: ctx.skill_service.clone(),
    };
    let auth_handler_state = auth::AuthHandlerState {
        auth_service: ctx.auth_service.clone(),
    };
    let health_state = health::HealthState {
        db: ctx.db.clone(),
        started_at: Arc::new(Instant::now()),
    };

    // Reads for any authenticated employee, mutations for admins only
    let employee_routes = Router::new()
        .route(
            "/",
            get(employees::list_employees)
                .merge(post(employees::create_employee).layer(admin_only.clone())),
        )
        .route(
            "/{id}",
            get(employees::get_employee).merge(
                put(employees::update_employee)
                    .merge(delete(employees::delete_employee))
                    .layer(admin_only.clone()),
            ),
        )
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(employee_state);

    let skill_routes = Router::new()
        .route(
            "/",
            get(skills::list_skills).merge(post(skills::create_skill).layer(admin_only)),
        )
        .route("/{id}", get(skills::get_skill))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(skill_state);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth_handler_state);

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let api_v1 = Router::new()
        .nest("/auth", auth_routes.merge(auth_protected_routes))
        .nest("/employees", employee_routes)
        .nest("/skills", skill_routes);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state)
        .nest("/api/v1", api_v1)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = ctx.prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}
