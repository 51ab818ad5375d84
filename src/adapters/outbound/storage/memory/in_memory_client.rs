use async_trait::async_trait;
use bytes::Bytes;
use object_store::{memory::InMemory, Attribute, ObjectStore as ObjectStoreBackend};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::{
    adapters::outbound::storage::{
        error::map_store_error,
        transfer::{copy_across, object_path, upload_file},
    },
    domain::{
        errors::{StorageError, StorageResult},
        models::{ConnectionConfig, CopyObjectRequest, DeleteObjectRequest, PresignRequest, PutObjectRequest},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::{ObjectStorageClient, StorageClientFactory},
};

/// An object read back from the in-memory backend
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub data: Bytes,
    pub storage_class: Option<String>,
    pub content_type: Option<String>,
}

/// Storage client keeping every bucket in process memory, for development and tests
#[derive(Clone, Default)]
pub struct InMemoryObjectStorageClient {
    buckets: Arc<RwLock<HashMap<BucketName, Arc<InMemory>>>>,
}

impl InMemoryObjectStorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buckets spring into existence on first write
    async fn bucket(&self, bucket: &BucketName) -> Arc<InMemory> {
        self.buckets
            .write()
            .await
            .entry(bucket.clone())
            .or_insert_with(|| Arc::new(InMemory::new()))
            .clone()
    }

    async fn existing_bucket(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<Arc<InMemory>> {
        self.buckets
            .read()
            .await
            .get(bucket)
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    /// Read an object with the attributes it was stored with
    pub async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<StoredObject> {
        let store = self.existing_bucket(bucket, key).await?;
        let result = store
            .get(&object_path(key)?)
            .await
            .map_err(|e| map_store_error(bucket, e))?;
        let attribute = |name: &Attribute| result.attributes.get(name).map(|v| v.to_string());
        let storage_class = attribute(&Attribute::StorageClass);
        let content_type = attribute(&Attribute::ContentType);
        let data = result.bytes().await.map_err(|e| map_store_error(bucket, e))?;

        Ok(StoredObject {
            data,
            storage_class,
            content_type,
        })
    }

    pub async fn object_exists(&self, bucket: &BucketName, key: &ObjectKey) -> bool {
        self.get_object(bucket, key).await.is_ok()
    }
}

#[async_trait]
impl ObjectStorageClient for InMemoryObjectStorageClient {
    async fn upload_file(&self, request: &PutObjectRequest) -> StorageResult<()> {
        let store = self.bucket(&request.bucket).await;
        upload_file(store, request).await
    }

    async fn copy_object(&self, request: &CopyObjectRequest) -> StorageResult<()> {
        let source = self
            .existing_bucket(&request.source_bucket, &request.source_key)
            .await?;

        if request.is_same_bucket() {
            return source
                .copy(
                    &object_path(&request.source_key)?,
                    &object_path(&request.destination_key)?,
                )
                .await
                .map_err(|e| map_store_error(&request.source_bucket, e));
        }

        let destination = self.bucket(&request.destination_bucket).await;
        copy_across(source.as_ref(), destination, request).await
    }

    async fn delete_object(&self, request: &DeleteObjectRequest) -> StorageResult<()> {
        // Deleting from an unknown bucket is a no-op, like deleting a missing key
        let Some(store) = self.buckets.read().await.get(&request.bucket).cloned() else {
            return Ok(());
        };
        store
            .delete(&object_path(&request.key)?)
            .await
            .map_err(|e| map_store_error(&request.bucket, e))
    }

    async fn presigned_get_url(&self, request: &PresignRequest) -> StorageResult<String> {
        let key = request
            .key
            .as_str()
            .split('/')
            .map(urlencoding::encode)
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!(
            "memory://{}/{}?X-Amz-Expires={}",
            request.bucket, key, request.expires_in_seconds
        ))
    }
}

/// Hands out one shared in-memory client to every connection
#[derive(Clone, Default)]
pub struct InMemoryClientFactory {
    client: InMemoryObjectStorageClient,
}

impl InMemoryClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared client, for inspecting stored objects
    pub fn client(&self) -> InMemoryObjectStorageClient {
        self.client.clone()
    }
}

impl StorageClientFactory for InMemoryClientFactory {
    fn create_client(&self, _config: &ConnectionConfig) -> StorageResult<Arc<dyn ObjectStorageClient>> {
        Ok(Arc::new(self.client.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ObjectTags, StorageClass};
    use std::io::Write;

    fn bucket(name: &str) -> BucketName {
        BucketName::new(name).unwrap()
    }

    fn key(name: &str) -> ObjectKey {
        ObjectKey::new(name).unwrap()
    }

    async fn upload(client: &InMemoryObjectStorageClient, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();

        let request = PutObjectRequest {
            bucket: bucket("b1"),
            key: key("photo.jpg"),
            file_path: file.path().to_path_buf(),
            storage_class: StorageClass::StandardIa,
            content_type: Some("image/jpeg".to_string()),
            tags: ObjectTags::default(),
        };
        client.upload_file(&request).await.unwrap();
        file
    }

    #[tokio::test]
    async fn test_upload_stores_data_and_attributes() {
        let client = InMemoryObjectStorageClient::new();
        let _file = upload(&client, b"jpeg bytes").await;

        let stored = client.get_object(&bucket("b1"), &key("photo.jpg")).await.unwrap();
        assert_eq!(stored.data, Bytes::from_static(b"jpeg bytes"));
        assert_eq!(stored.storage_class.as_deref(), Some("STANDARD_IA"));
        assert_eq!(stored.content_type.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_upload_of_missing_file_fails() {
        let client = InMemoryObjectStorageClient::new();
        let request = PutObjectRequest {
            bucket: bucket("b1"),
            key: key("gone.jpg"),
            file_path: "/definitely/not/here.jpg".into(),
            storage_class: StorageClass::Standard,
            content_type: None,
            tags: ObjectTags::default(),
        };

        let err = client.upload_file(&request).await.unwrap_err();
        assert!(matches!(err, StorageError::FileUnreadable { .. }));
    }

    #[tokio::test]
    async fn test_copy_within_and_across_buckets() {
        let client = InMemoryObjectStorageClient::new();
        let _file = upload(&client, b"data").await;

        let within = CopyObjectRequest {
            source_bucket: bucket("b1"),
            source_key: key("photo.jpg"),
            destination_bucket: bucket("b1"),
            destination_key: key("copy.jpg"),
        };
        client.copy_object(&within).await.unwrap();
        assert!(client.object_exists(&bucket("b1"), &key("copy.jpg")).await);

        let across = CopyObjectRequest {
            destination_bucket: bucket("b2"),
            destination_key: key("b.jpg"),
            ..within
        };
        client.copy_object(&across).await.unwrap();
        let copied = client.get_object(&bucket("b2"), &key("b.jpg")).await.unwrap();
        assert_eq!(copied.data, Bytes::from_static(b"data"));
        assert_eq!(copied.storage_class.as_deref(), Some("STANDARD_IA"));
    }

    #[tokio::test]
    async fn test_copy_of_missing_source() {
        let client = InMemoryObjectStorageClient::new();
        let request = CopyObjectRequest {
            source_bucket: bucket("nowhere"),
            source_key: key("a.jpg"),
            destination_bucket: bucket("b2"),
            destination_key: key("b.jpg"),
        };

        let err = client.copy_object(&request).await.unwrap_err();
        assert!(matches!(err, StorageError::ObjectNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_removes_object() {
        let client = InMemoryObjectStorageClient::new();
        let _file = upload(&client, b"data").await;

        let request = DeleteObjectRequest {
            bucket: bucket("b1"),
            key: key("photo.jpg"),
        };
        client.delete_object(&request).await.unwrap();
        assert!(!client.object_exists(&bucket("b1"), &key("photo.jpg")).await);

        // Unknown buckets are fine too
        let request = DeleteObjectRequest {
            bucket: bucket("other"),
            ..request
        };
        client.delete_object(&request).await.unwrap();
    }

    #[tokio::test]
    async fn test_key_with_reserved_characters_kept_verbatim() {
        let client = InMemoryObjectStorageClient::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"front door").unwrap();
        let odd_key = key("snapshots/front door [1]#2.jpg");

        let request = PutObjectRequest {
            bucket: bucket("b1"),
            key: odd_key.clone(),
            file_path: file.path().to_path_buf(),
            storage_class: StorageClass::Standard,
            content_type: None,
            tags: ObjectTags::default(),
        };
        client.upload_file(&request).await.unwrap();

        let store = client.existing_bucket(&bucket("b1"), &odd_key).await.unwrap();
        let listed = store.list_with_delimiter(Some(&"snapshots".into())).await.unwrap();
        assert_eq!(
            listed.objects[0].location.as_ref(),
            "snapshots/front door [1]#2.jpg"
        );

        let url = client
            .presigned_get_url(&PresignRequest {
                bucket: bucket("b1"),
                key: odd_key,
                expires_in_seconds: 60,
            })
            .await
            .unwrap();
        assert_eq!(
            url,
            "memory://b1/snapshots/front%20door%20%5B1%5D%232.jpg?X-Amz-Expires=60"
        );
    }
}
