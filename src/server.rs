//! Server runtime
//!
//! [`ServerHandle`] owns the whole lifecycle: stores, migrations, seeding,
//! the REST API and graceful shutdown. The binary only parses the CLI and
//! hands a finished [`AppConfig`] to [`ServerHandle::start`].

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use chrono::Local;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{
    AuthService, EmployeeInput, EmployeeService, PasswordHasher, SkillService,
};
use crate::config::AppConfig;
use crate::domain::{DomainResult, EmployeeRepository, EmployeeType, SkillRepository};
use crate::infrastructure::crypto::password::BcryptPasswordHasher;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, InMemoryEmployeeRepository, InMemorySkillRepository, SeaOrmEmployeeRepository,
    SeaOrmSkillRepository,
};
use crate::interfaces::http::{create_api_router, ApiContext};
use crate::shared::shutdown::{install_shutdown_listener, ShutdownSignal};

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// DashMap stores instead of the database; data is lost on exit.
    pub in_memory: bool,
    /// Create the configured admin employee when no employee exists.
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            in_memory: false,
            create_default_admin: true,
        }
    }
}

/// Handle to a running service.
pub struct ServerHandle {
    pub config: AppConfig,
    pub employee_service: Arc<EmployeeService>,
    pub skill_service: Arc<SkillService>,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect the stores, run migrations, seed, and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting employee registry...");

        let prometheus = prometheus_handle();
        let jwt_config = app_cfg.jwt_config();

        // ── Stores ─────────────────────────────────────────────
        let (db, employees, skills): (
            Option<DatabaseConnection>,
            Arc<dyn EmployeeRepository>,
            Arc<dyn SkillRepository>,
        ) = if opts.in_memory {
            warn!("Using in-memory stores; data will not survive a restart");
            (
                None,
                Arc::new(InMemoryEmployeeRepository::new()),
                Arc::new(InMemorySkillRepository::new()),
            )
        } else {
            let db = init_database(&app_cfg.database_config()).await?;
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
            (
                Some(db.clone()),
                Arc::new(SeaOrmEmployeeRepository::new(db.clone())),
                Arc::new(SeaOrmSkillRepository::new(db)),
            )
        };

        // ── Services ───────────────────────────────────────────
        let password_hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptPasswordHasher::new(app_cfg.security.bcrypt_cost));
        let employee_service = Arc::new(EmployeeService::new(
            employees,
            skills.clone(),
            password_hasher.clone(),
        ));
        let skill_service = Arc::new(SkillService::new(skills));
        let auth_service = Arc::new(AuthService::new(
            employee_service.clone(),
            password_hasher,
            jwt_config.clone(),
        ));

        let seeded = skill_service.seed(&app_cfg.seed.skills).await?;
        if seeded > 0 {
            info!(count = seeded, "Seeded skill catalogue");
        }

        if opts.create_default_admin {
            create_default_admin(&employee_service, &app_cfg).await;
        }

        // ── REST API ───────────────────────────────────────────
        let router = create_api_router(ApiContext {
            employee_service: employee_service.clone(),
            skill_service: skill_service.clone(),
            auth_service,
            jwt_config,
            db: db.clone(),
            prometheus,
        });

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("REST API listening on http://{}", addr);
        info!("Swagger UI available at http://{}/docs/", addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_task = tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API received shutdown signal");
            });
            if let Err(e) = server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config: app_cfg,
            employee_service,
            skill_service,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        let os_signal = install_shutdown_listener();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            os_signal.wait().await;
            shutdown.trigger();
        });
    }

    /// Wait for the API to drain after shutdown was triggered, then close
    /// the database. Gives up after `server.shutdown_timeout` seconds.
    pub async fn wait(self) {
        let timeout = Duration::from_secs(self.config.server.shutdown_timeout);
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API stopped"),
            Ok(Err(e)) => error!("REST API task panicked: {}", e),
            Err(_) => warn!(
                timeout_secs = timeout.as_secs(),
                "REST API did not stop in time"
            ),
        }

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Employee registry shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.shutdown.trigger();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process, so repeated
/// starts reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Some(handle.clone());
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(PROM_HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
            None
        }
    }
}

/// Create the configured admin employee if the store has no employees.
async fn create_default_admin(employees: &EmployeeService, app_cfg: &AppConfig) {
    match ensure_default_admin(employees, app_cfg).await {
        Ok(true) => {
            info!("Default admin created: {}", app_cfg.admin.email);
            warn!("Change the default admin password immediately");
        }
        Ok(false) => {}
        Err(e) => error!("Failed to create default admin: {}", e),
    }
}

async fn ensure_default_admin(employees: &EmployeeService, app_cfg: &AppConfig) -> DomainResult<bool> {
    if employees.count().await? > 0 {
        return Ok(false);
    }

    employees
        .create(EmployeeInput {
            name: app_cfg.admin.name.clone(),
            email: app_cfg.admin.email.clone(),
            password: app_cfg.admin.password.clone(),
            employee_type: EmployeeType::Admin,
            skill_ids: Vec::new(),
            employment_date: Local::now().date_naive(),
        })
        .await?;
    Ok(true)
}

/// Initialize tracing from the logging config. `RUST_LOG` wins when set.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> EmployeeService {
        EmployeeService::new(
            Arc::new(InMemoryEmployeeRepository::new()),
            Arc::new(InMemorySkillRepository::new()),
            Arc::new(BcryptPasswordHasher::new(4)),
        )
    }

    #[tokio::test]
    async fn default_admin_is_created_once() {
        let employees = service();
        let config = AppConfig::default();

        assert!(ensure_default_admin(&employees, &config).await.unwrap());
        assert!(!ensure_default_admin(&employees, &config).await.unwrap());

        let principal = employees
            .load_principal_by_username(&config.admin.email)
            .await
            .unwrap();
        assert!(principal.has_role(EmployeeType::Admin));
    }

    #[tokio::test]
    async fn in_memory_server_starts_and_stops() {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.security.bcrypt_cost = 4;

        let handle = ServerHandle::start(ServerOptions {
            config,
            in_memory: true,
            create_default_admin: true,
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_eq!(handle.employee_service.count().await.unwrap(), 1);
        assert!(!handle.skill_service.list_all().await.unwrap().is_empty());

        handle.shutdown().await;
    }
}
