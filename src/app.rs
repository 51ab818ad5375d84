use axum::Router;
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info, warn};

use crate::{
    adapters::{
        inbound::http::{create_router, AppState},
        outbound::{
            host::{AllowListPathPolicy, BroadcastEventBus, InMemoryServiceRegistry},
            persistence::{InMemoryConfigEntryRepository, JsonFileConfigEntryRepository},
            storage::{InMemoryClientFactory, S3ClientFactory},
        },
    },
    domain::models::{FlowResult, UserInput},
    ports::{
        host::{PathPolicy, ServiceRegistry},
        repositories::ConfigEntryRepository,
        services::{ConfigFlowService, ObjectActionService},
        storage::StorageClientFactory,
    },
    services::{ConfigFlowServiceImpl, ConnectionRegistry, ObjectActionServiceImpl, S3Integration},
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    /// Directories local files may be uploaded from
    pub allowlist_external_dirs: Vec<PathBuf>,
}

/// Which client each config entry gets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Objects kept in process memory, shared by all entries
    #[default]
    InMemory,
    /// Real S3 (or S3-compatible endpoint) per entry
    S3,
}

/// Where config entries are persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    JsonFile { path: PathBuf },
}

/// Application dependencies container
pub struct AppDependencies {
    pub client_factory: Arc<dyn StorageClientFactory>,
    pub repository: Arc<dyn ConfigEntryRepository>,
    pub path_policy: Arc<dyn PathPolicy>,
    pub service_registry: Arc<dyn ServiceRegistry>,
    pub event_bus: BroadcastEventBus,
}

/// Application services container
pub struct AppServices {
    pub action_service: Arc<dyn ObjectActionService>,
    pub config_flow: Arc<ConfigFlowServiceImpl>,
    pub integration: Arc<S3Integration>,
    pub connections: ConnectionRegistry,
    pub service_registry: Arc<dyn ServiceRegistry>,
    pub event_bus: BroadcastEventBus,
}

impl AppServices {
    pub fn app_state(&self) -> AppState {
        AppState {
            service_registry: self.service_registry.clone(),
            config_flow: self.config_flow.clone(),
            event_bus: self.event_bus.clone(),
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.app_state())
    }

    /// Run connection settings through the import step; returns how many
    /// new entries were created
    pub async fn import_entries(&self, inputs: Vec<UserInput>) -> Result<usize, AppError> {
        let mut created = 0;
        for input in inputs {
            let result = self
                .config_flow
                .step_import(input)
                .await
                .map_err(|e| AppError::ServiceInit {
                    message: e.to_string(),
                })?;

            match result {
                FlowResult::CreateEntry { title, .. } => {
                    info!("Imported S3 config entry {}", title);
                    created += 1;
                }
                FlowResult::Abort { reason } => debug!(reason, "Import skipped"),
                FlowResult::Form { errors, .. } => {
                    warn!(?errors, "Imported S3 connection settings are invalid")
                }
                FlowResult::UpdateEntry { .. } => {}
            }
        }
        Ok(created)
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
    client_factory: Option<Arc<dyn StorageClientFactory>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            client_factory: None,
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Allow uploads from files below `dir`
    pub fn with_allowed_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.allowlist_external_dirs.push(dir.into());
        self
    }

    /// Use this factory instead of the one picked by the storage backend
    pub fn with_client_factory(mut self, factory: Arc<dyn StorageClientFactory>) -> Self {
        self.client_factory = Some(factory);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let client_factory = match self.client_factory {
            Some(factory) => factory,
            None => match self.config.storage_backend {
                StorageBackend::InMemory => {
                    Arc::new(InMemoryClientFactory::new()) as Arc<dyn StorageClientFactory>
                }
                StorageBackend::S3 => Arc::new(S3ClientFactory),
            },
        };

        let repository: Arc<dyn ConfigEntryRepository> = match &self.config.repository_backend {
            RepositoryBackend::InMemory => Arc::new(InMemoryConfigEntryRepository::new()),
            RepositoryBackend::JsonFile { path } => Arc::new(
                JsonFileConfigEntryRepository::open(path.clone())
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("{}: {}", path.display(), e),
                    })?,
            ),
        };

        let path_policy = AllowListPathPolicy::new(self.config.allowlist_external_dirs);
        if path_policy.allowed_dirs().is_empty() {
            warn!("No allowlisted directories configured, every upload will be rejected");
        } else {
            debug!(dirs = ?path_policy.allowed_dirs(), "Uploads allowed from");
        }

        Ok(AppDependencies {
            client_factory,
            repository,
            path_policy: Arc::new(path_policy),
            service_registry: Arc::new(InMemoryServiceRegistry::new()),
            event_bus: BroadcastEventBus::new(),
        })
    }

    /// Build the complete application and enable persisted entries
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let connections = ConnectionRegistry::new();

        // Create services with dependency injection
        let action_service: Arc<dyn ObjectActionService> = Arc::new(ObjectActionServiceImpl::new(
            connections.clone(),
            deps.path_policy.clone(),
            Arc::new(deps.event_bus.clone()),
        ));

        let integration = Arc::new(S3Integration::new(
            connections.clone(),
            deps.client_factory.clone(),
            deps.service_registry.clone(),
            action_service.clone(),
        ));

        let config_flow = Arc::new(ConfigFlowServiceImpl::new(
            deps.repository.clone(),
            integration.clone(),
        ));

        let loaded = config_flow
            .setup_persisted_entries()
            .await
            .map_err(|e| AppError::ServiceInit {
                message: e.to_string(),
            })?;
        info!(loaded, "Persisted S3 config entries enabled");

        Ok(AppServices {
            action_service,
            config_flow,
            integration,
            connections,
            service_registry: deps.service_registry,
            event_bus: deps.event_bus,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app(
    allowlist_external_dirs: Vec<PathBuf>,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(AppConfig {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            allowlist_external_dirs,
        })
        .build()
        .await
}

/// Create an S3-backed application with entries persisted to `config_entries_path`
pub async fn create_s3_app(
    config_entries_path: PathBuf,
    allowlist_external_dirs: Vec<PathBuf>,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_config(AppConfig {
            storage_backend: StorageBackend::S3,
            repository_backend: RepositoryBackend::JsonFile {
                path: config_entries_path,
            },
            allowlist_external_dirs,
        })
        .build()
        .await
}

/// Read the application configuration from environment variables
pub fn config_from_env() -> Result<AppConfig, AppError> {
    let storage_backend = match std::env::var("STORAGE_BACKEND").as_deref() {
        Ok("s3") => StorageBackend::S3,
        Ok("memory") | Err(_) => StorageBackend::InMemory,
        Ok(other) => {
            return Err(AppError::Configuration {
                message: format!("Unknown STORAGE_BACKEND {}", other),
            })
        }
    };

    let repository_backend = match std::env::var("CONFIG_ENTRIES_PATH") {
        Ok(path) if !path.is_empty() => RepositoryBackend::JsonFile { path: path.into() },
        _ => RepositoryBackend::InMemory,
    };

    let allowlist_external_dirs = std::env::var_os("ALLOWLIST_EXTERNAL_DIRS")
        .map(|dirs| std::env::split_paths(&dirs).collect())
        .unwrap_or_default();

    Ok(AppConfig {
        storage_backend,
        repository_backend,
        allowlist_external_dirs,
    })
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new().with_config(config_from_env()?).build().await
}
