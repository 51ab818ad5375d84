use anyhow::{Context, Result};
use clap::Parser;
use s3_actions::{
    app::{AppBuilder, AppConfig, RepositoryBackend, StorageBackend},
    domain::models::UserInput,
};
use std::{net::SocketAddr, path::PathBuf};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "s3-actions-server")]
#[command(about = "Host exposing S3 put/copy/delete/signed_url actions", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type (memory or s3)
    #[arg(long, env = "STORAGE_BACKEND", default_value = "memory")]
    storage_backend: String,

    /// JSON file config entries are persisted to; in memory if unset
    #[arg(long, env = "CONFIG_ENTRIES_PATH")]
    config_entries_path: Option<PathBuf>,

    /// Directory local files may be uploaded from (repeatable)
    #[arg(long = "allow-dir", env = "ALLOWLIST_EXTERNAL_DIRS", value_delimiter = ',')]
    allowlist_external_dirs: Vec<PathBuf>,

    /// JSON file with a list of connection settings to import at startup
    #[arg(long, env = "S3_IMPORT_FILE")]
    import_file: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "memory" => StorageBackend::InMemory,
            "s3" => StorageBackend::S3,
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        let repository_backend = match &self.config_entries_path {
            Some(path) => RepositoryBackend::JsonFile { path: path.clone() },
            None => RepositoryBackend::InMemory,
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            allowlist_external_dirs: self.allowlist_external_dirs.clone(),
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = match self.log_level.to_lowercase().as_str() {
            level @ ("trace" | "debug" | "info" | "warn" | "error") => level.to_string(),
            _ => "info".to_string(),
        };

        // RUST_LOG wins over --log-level
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }

    async fn read_imports(&self) -> Result<Vec<UserInput>> {
        let Some(path) = &self.import_file else {
            return Ok(Vec::new());
        };
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read import file {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("Invalid import file {}", path.display()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging()?;

    info!("Starting S3 actions server");
    info!("Storage backend: {}", cli.storage_backend);

    // Create app configuration
    let config = cli.to_app_config()?;
    let imports = cli.read_imports().await?;

    // Build the application
    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    if !imports.is_empty() {
        let created = app_services
            .import_entries(imports)
            .await
            .context("Failed to import connection settings")?;
        info!("Imported {} config entries", created);
    }

    // Create the router
    let router = app_services.router();

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    // Start the server
    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
