//! Employee registry: REST service for employees and their skills.
//!
//! ```sh
//! # Default config (~/.config/employee-registry/config.toml)
//! employee-registry
//!
//! # Custom config path and port
//! employee-registry --config /etc/employee-registry/config.toml --port 9090
//!
//! # Validate config without starting
//! employee-registry --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};

use employee_registry::config::AppConfig;
use employee_registry::default_config_path;
use employee_registry::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "employee-registry",
    version,
    about = "Employee and skill management REST service"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "EMPLOYEE_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Keep everything in memory instead of the database.
    #[arg(long)]
    in_memory: bool,

    /// Skip creating the default admin employee.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config_exists = config_path.exists();

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            return Err(e.into());
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    if config_exists {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!(
            "No config file at {}, using defaults",
            config_path.display()
        );
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        in_memory: cli.in_memory,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
