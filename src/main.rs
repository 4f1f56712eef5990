//! Foodgate Server: authentication service for the food-ordering platform.
//!
//! Main entry point that loads configuration, initializes logging, and
//! dispatches the CLI subcommand.

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use foodgate_auth::{HierarchyIndex, PasswordHasher, TokenLifecycleManager};
use foodgate_core::AppError;
use foodgate_core::config::AppConfig;

/// Foodgate authentication server.
#[derive(Debug, Parser)]
#[command(name = "foodgate-server", version, about)]
struct Cli {
    /// Path to the configuration file (overrides FOODGATE_CONFIG).
    #[arg(long, short)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Print an Argon2 PHC hash for seeding a user record.
    HashPassword {
        /// Plaintext password.
        password: String,
    },
    /// Validate the signing key and role hierarchy, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Command::HashPassword { password }) = &cli.command {
        match PasswordHasher::new().hash_password(password) {
            Ok(hash) => println!("{hash}"),
            Err(e) => {
                eprintln!("Failed to hash password: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::CheckConfig => check_config(&config),
        _ => foodgate_api::run_server(config).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration(path: Option<&str>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(str::to_owned)
        .or_else(|| std::env::var("FOODGATE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Builds the signing key and hierarchy exactly as `serve` would.
fn check_config(config: &AppConfig) -> Result<(), AppError> {
    let lifecycle = TokenLifecycleManager::new(&config.auth)?;
    let hierarchy = HierarchyIndex::from_config(&config.hierarchy)?;

    tracing::info!(
        access_ttl_ms = lifecycle.access_ttl_ms(),
        refresh_ttl_ms = lifecycle.refresh_ttl_ms(),
        roles = hierarchy.len(),
        users = config.users.len(),
        public_paths = ?config.auth.public_paths,
        "Configuration OK"
    );
    Ok(())
}
