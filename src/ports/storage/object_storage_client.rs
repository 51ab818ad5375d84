use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    errors::StorageResult,
    models::{ConnectionConfig, CopyObjectRequest, DeleteObjectRequest, PresignRequest, PutObjectRequest},
};

/// Port for the cloud object storage client bound to one connection.
///
/// Each method is a single backend call. Implementations must not retry.
#[async_trait]
pub trait ObjectStorageClient: Send + Sync + 'static {
    /// Upload a local file as an object, applying storage class, content type and tags
    async fn upload_file(&self, request: &PutObjectRequest) -> StorageResult<()>;

    /// Copy an object, possibly into another bucket
    async fn copy_object(&self, request: &CopyObjectRequest) -> StorageResult<()>;

    /// Delete an object
    async fn delete_object(&self, request: &DeleteObjectRequest) -> StorageResult<()>;

    /// Generate a time-limited GET URL for an object
    async fn presigned_get_url(&self, request: &PresignRequest) -> StorageResult<String>;
}

/// Builds clients from config entry data
pub trait StorageClientFactory: Send + Sync + 'static {
    fn create_client(&self, config: &ConnectionConfig) -> StorageResult<Arc<dyn ObjectStorageClient>>;
}
