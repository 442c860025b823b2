//! User CRUD service: CLI server
//!
//! ```sh
//! # Run with default config (~/.config/user-crud/config.toml)
//! user-crud-service
//!
//! # Custom config path and port
//! user-crud-service --config /etc/user-crud/config.toml --port 8081
//!
//! # Throwaway in-memory store
//! user-crud-service --in-memory
//!
//! # Validate config without starting
//! user-crud-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use user_crud::config::{AppConfig, CONFIG_ENV};
use user_crud::server::{init_tracing, ServerHandle, ServerOptions};

/// REST service for managing users and their contact numbers.
#[derive(Parser, Debug)]
#[command(
    name = "user-crud-service",
    version,
    about = "User CRUD REST service",
    long_about = "REST API for creating, reading, updating and deleting users \
                  with a validated contact number.\n\n\
                  Default config: ~/.config/user-crud/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding the default users.
    #[arg(long)]
    no_seed: bool,

    /// Keep users in memory instead of the configured database.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(user_crud::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_env_overrides()?;

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);
    match &load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Seed        : {}", config.seed.enabled);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let mut opts = ServerOptions::from_config(config);
    opts.auto_migrate &= !cli.no_migrate;
    opts.seed &= !cli.no_seed;
    opts.in_memory = cli.in_memory;

    let handle = ServerHandle::start(opts).await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
