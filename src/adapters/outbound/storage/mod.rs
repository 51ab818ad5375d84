// Infrastructure error mapping
pub mod error;

// Shared object_store routines
mod transfer;

// Provider-specific implementations
pub mod memory;
pub mod s3;

// Re-export key types
pub use memory::{InMemoryClientFactory, InMemoryObjectStorageClient, StoredObject};
pub use s3::{S3ClientFactory, S3ObjectStorageClient};
