pub mod host;
pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use host::{EventBus, PathPolicy, ServiceCallError, ServiceHandler, ServiceName, ServiceRegistry};
pub use repositories::{ConfigEntryRepository, RepositoryError};
pub use services::{ConfigFlowService, ObjectActionService};
pub use storage::{ObjectStorageClient, StorageClientFactory};
