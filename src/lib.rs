pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - value objects, models and errors
pub use domain::{
    // Errors
    ActionError,
    ActionResult,
    // Value objects
    BucketName,
    // Models
    ConfigEntry,
    ConnectionConfig,
    CopyObjectParams,
    DeleteObjectParams,
    EntryId,
    Event,
    FlowResult,
    ObjectKey,
    ObjectTags,
    PresignParams,
    PutObjectParams,
    Region,
    SignedUrlEvent,
    StorageClass,
    StorageError,
    UserInput,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{
    // Host ports
    EventBus,
    PathPolicy,
    ServiceName,
    ServiceRegistry,
    // Repository ports
    ConfigEntryRepository,
    // Service ports
    ConfigFlowService,
    ObjectActionService,
    // Storage ports
    ObjectStorageClient,
    StorageClientFactory,
};

// Service implementations - business logic
pub use services::{
    ConfigFlowServiceImpl, ConnectionRegistry, ObjectActionServiceImpl, S3Integration,
};

// Application factory and configuration
pub use app::{
    create_app_from_env, create_in_memory_app, create_s3_app, AppBuilder, AppConfig,
    AppDependencies, AppError, AppServices, RepositoryBackend, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::storage::{
    InMemoryClientFactory, InMemoryObjectStorageClient, S3ClientFactory, S3ObjectStorageClient,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_s3_app, AppBuilder, AppServices, BucketName, ConfigFlowService,
        EntryId, ObjectActionService, ObjectKey, PutObjectParams, ServiceRegistry, StorageClass,
        UserInput,
    };
}
