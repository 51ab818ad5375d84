use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::ConnectionRegistry;
use crate::{
    domain::{
        errors::{ActionError, ActionResult},
        models::{
            CopyObjectParams, DeleteObjectParams, PresignParams, PutObjectParams, PutObjectRequest,
            SignedUrlEvent,
        },
        value_objects::{BucketName, EntryId, ObjectKey, ObjectTags, StorageClass},
    },
    ports::{
        host::{EventBus, PathPolicy},
        services::ObjectActionService,
        storage::ObjectStorageClient,
    },
};

/// Validates action parameters and delegates them to a storage client
#[derive(Clone)]
pub struct ObjectActionServiceImpl {
    connections: ConnectionRegistry,
    path_policy: Arc<dyn PathPolicy>,
    event_bus: Arc<dyn EventBus>,
}

impl ObjectActionServiceImpl {
    pub fn new(
        connections: ConnectionRegistry,
        path_policy: Arc<dyn PathPolicy>,
        event_bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            connections,
            path_policy,
            event_bus,
        }
    }

    /// Pick the client for a call.
    ///
    /// Without an explicit entry the first enabled connection is used; the
    /// bucket plays no part in the choice.
    async fn client_for(
        &self,
        entry_id: Option<&EntryId>,
    ) -> ActionResult<Arc<dyn ObjectStorageClient>> {
        match entry_id {
            Some(entry_id) => self
                .connections
                .get(entry_id)
                .await
                .ok_or(ActionError::ConnectionNotFound(*entry_id)),
            None => {
                let (entry_id, client) =
                    self.connections.first().await.ok_or(ActionError::NoConnection)?;
                debug!(%entry_id, "Using first configured connection");
                Ok(client)
            }
        }
    }

    fn build_put_request(&self, params: &PutObjectParams) -> ActionResult<PutObjectRequest> {
        let storage_class = match params.storage_class.as_deref() {
            None => StorageClass::default(),
            Some(class) => class
                .parse()
                .map_err(|_| ActionError::InvalidStorageClass(class.to_string()))?,
        };

        let file_path = PathBuf::from(&params.file_path);
        if params.file_path.is_empty() || !self.path_policy.is_allowed_path(&file_path) {
            return Err(ActionError::PathNotAllowed(params.file_path.clone()));
        }

        let bucket =
            BucketName::new(params.bucket.as_str()).map_err(|e| ActionError::invalid("bucket", e))?;
        let key = match &params.key {
            Some(key) => ObjectKey::new(key.as_str()),
            None => ObjectKey::from_file_name(&file_path),
        }
        .map_err(|e| ActionError::invalid("key", e))?;
        let tags = match params.tags.as_deref() {
            Some(tags) => tags
                .parse::<ObjectTags>()
                .map_err(|e| ActionError::invalid("tags", e))?,
            None => ObjectTags::default(),
        };

        Ok(PutObjectRequest {
            bucket,
            key,
            file_path,
            storage_class,
            content_type: params.content_type.clone().filter(|ct| !ct.is_empty()),
            tags,
        })
    }
}

#[async_trait]
impl ObjectActionService for ObjectActionServiceImpl {
    async fn put_object(&self, params: PutObjectParams) -> ActionResult<()> {
        let request = self.build_put_request(&params)?;
        let client = self.client_for(params.entry_id.as_ref()).await?;

        client
            .upload_file(&request)
            .await
            .map_err(|e| ActionError::storage("upload", e))?;

        info!(
            "Put file {} to S3 bucket {} as {} using storage class {}",
            request.file_path.display(),
            request.bucket,
            request.key,
            request.storage_class
        );
        Ok(())
    }

    async fn copy_object(&self, params: CopyObjectParams) -> ActionResult<()> {
        let request = params.resolve()?;
        let client = self.client_for(params.entry_id.as_ref()).await?;

        client
            .copy_object(&request)
            .await
            .map_err(|e| ActionError::storage("copy", e))?;

        info!(
            "Copied {}/{} to {}/{}",
            request.source_bucket,
            request.source_key,
            request.destination_bucket,
            request.destination_key
        );
        Ok(())
    }

    async fn delete_object(&self, params: DeleteObjectParams) -> ActionResult<()> {
        let request = params.resolve()?;
        let client = self.client_for(params.entry_id.as_ref()).await?;

        client
            .delete_object(&request)
            .await
            .map_err(|e| ActionError::storage("delete", e))?;

        info!("Deleted {}/{}", request.bucket, request.key);
        Ok(())
    }

    async fn generate_presigned_url(&self, params: PresignParams) -> ActionResult<String> {
        let request = params.resolve()?;
        let client = self.client_for(params.entry_id.as_ref()).await?;

        let url = client
            .presigned_get_url(&request)
            .await
            .map_err(|e| ActionError::storage("presign", e))?;

        info!(
            "Generated presigned URL for {}/{} valid for {}s",
            request.bucket, request.key, request.expires_in_seconds
        );
        self.event_bus.publish(
            SignedUrlEvent {
                url: url.clone(),
                message: params.message,
                bucket: request.bucket.to_string(),
                key: request.key.to_string(),
            }
            .into(),
        );

        Ok(url)
    }
}
