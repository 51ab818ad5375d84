use async_trait::async_trait;
use http::Method;
use object_store::{aws::AmazonS3, signer::Signer, ObjectStore as ObjectStoreBackend};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tracing::debug;

use super::create_s3_store;
use crate::{
    adapters::outbound::storage::{
        error::map_store_error,
        transfer::{copy_across, object_path, upload_file},
    },
    domain::{
        errors::{StorageError, StorageResult},
        models::{ConnectionConfig, CopyObjectRequest, DeleteObjectRequest, PresignRequest, PutObjectRequest},
        value_objects::BucketName,
    },
    ports::storage::{ObjectStorageClient, StorageClientFactory},
};

/// S3 client for one connection
pub struct S3ObjectStorageClient {
    config: ConnectionConfig,
    stores: RwLock<HashMap<BucketName, Arc<AmazonS3>>>,
}

impl S3ObjectStorageClient {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            stores: RwLock::new(HashMap::new()),
        }
    }

    async fn store(&self, bucket: &BucketName) -> StorageResult<Arc<AmazonS3>> {
        if let Some(store) = self.stores.read().await.get(bucket) {
            return Ok(store.clone());
        }

        let mut stores = self.stores.write().await;
        if let Some(store) = stores.get(bucket) {
            return Ok(store.clone());
        }
        debug!(%bucket, region = %self.config.region, "Building S3 store");
        let store = Arc::new(create_s3_store(&self.config, bucket)?);
        stores.insert(bucket.clone(), store.clone());
        Ok(store)
    }
}

#[async_trait]
impl ObjectStorageClient for S3ObjectStorageClient {
    async fn upload_file(&self, request: &PutObjectRequest) -> StorageResult<()> {
        let store = self.store(&request.bucket).await?;
        upload_file(store, request).await
    }

    async fn copy_object(&self, request: &CopyObjectRequest) -> StorageResult<()> {
        let source = self.store(&request.source_bucket).await?;

        if request.is_same_bucket() {
            return source
                .copy(
                    &object_path(&request.source_key)?,
                    &object_path(&request.destination_key)?,
                )
                .await
                .map_err(|e| map_store_error(&request.source_bucket, e));
        }

        // object_store stores are bound to a single bucket
        let destination = self.store(&request.destination_bucket).await?;
        copy_across(source.as_ref(), destination, request).await
    }

    async fn delete_object(&self, request: &DeleteObjectRequest) -> StorageResult<()> {
        let store = self.store(&request.bucket).await?;
        store
            .delete(&object_path(&request.key)?)
            .await
            .map_err(|e| map_store_error(&request.bucket, e))
    }

    async fn presigned_get_url(&self, request: &PresignRequest) -> StorageResult<String> {
        let store = self.store(&request.bucket).await?;
        let url = store
            .signed_url(
                Method::GET,
                &object_path(&request.key)?,
                Duration::from_secs(request.expires_in_seconds),
            )
            .await
            .map_err(|e| map_store_error(&request.bucket, e))?;
        Ok(url.to_string())
    }
}

/// Builds [`S3ObjectStorageClient`]s from config entry data
#[derive(Debug, Clone, Default)]
pub struct S3ClientFactory;

impl StorageClientFactory for S3ClientFactory {
    fn create_client(&self, config: &ConnectionConfig) -> StorageResult<Arc<dyn ObjectStorageClient>> {
        config
            .validate()
            .map_err(|e| StorageError::ClientConfiguration {
                message: e.to_string(),
            })?;
        Ok(Arc::new(S3ObjectStorageClient::new(config.clone())))
    }
}
