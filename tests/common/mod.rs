#![allow(dead_code)]

use async_trait::async_trait;
use s3_actions::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{
            ConnectionConfig, CopyObjectRequest, DeleteObjectRequest, PresignRequest,
            PutObjectRequest, UserInput,
        },
    },
    adapters::outbound::host::InMemoryServiceRegistry,
    ports::{
        host::{PathPolicy, ServiceCallError, ServiceHandler, ServiceName, ServiceRegistry},
        storage::ObjectStorageClient,
        StorageClientFactory,
    },
};
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

/// One call received by [`RecordingStorageClient`]
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Upload(PutObjectRequest),
    Copy(CopyObjectRequest),
    Delete(DeleteObjectRequest),
    Presign(PresignRequest),
}

/// Storage client that records every call and can be told to fail
#[derive(Debug, Clone, Default)]
pub struct RecordingStorageClient {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingStorageClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let client = Self::default();
        client.set_failing(true);
        client
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> StorageResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::AccessDenied {
                message: "The AWS Access Key Id you provided does not exist".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorageClient for RecordingStorageClient {
    async fn upload_file(&self, request: &PutObjectRequest) -> StorageResult<()> {
        self.record(RecordedCall::Upload(request.clone()))
    }

    async fn copy_object(&self, request: &CopyObjectRequest) -> StorageResult<()> {
        self.record(RecordedCall::Copy(request.clone()))
    }

    async fn delete_object(&self, request: &DeleteObjectRequest) -> StorageResult<()> {
        self.record(RecordedCall::Delete(request.clone()))
    }

    async fn presigned_get_url(&self, request: &PresignRequest) -> StorageResult<String> {
        self.record(RecordedCall::Presign(request.clone()))?;
        Ok(format!(
            "https://{}.s3.amazonaws.com/{}?X-Amz-Expires={}",
            request.bucket, request.key, request.expires_in_seconds
        ))
    }
}

/// Hands out the same recording client for every entry
#[derive(Debug, Clone, Default)]
pub struct RecordingClientFactory {
    pub client: RecordingStorageClient,
    pub created: Arc<AtomicUsize>,
    pub rejecting: Arc<AtomicBool>,
}

impl StorageClientFactory for RecordingClientFactory {
    fn create_client(
        &self,
        _config: &ConnectionConfig,
    ) -> StorageResult<Arc<dyn ObjectStorageClient>> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(StorageError::ClientConfiguration {
                message: "Invalid endpoint".to_string(),
            });
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.client.clone()))
    }
}

/// Service registry that counts removals
#[derive(Clone, Default)]
pub struct RemovalCountingRegistry {
    inner: InMemoryServiceRegistry,
    pub removed: Arc<AtomicUsize>,
}

#[async_trait]
impl ServiceRegistry for RemovalCountingRegistry {
    async fn register(&self, name: ServiceName, handler: Arc<dyn ServiceHandler>) {
        self.inner.register(name, handler).await
    }

    async fn remove(&self, name: &ServiceName) -> bool {
        self.removed.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(name).await
    }

    async fn has_service(&self, name: &ServiceName) -> bool {
        self.inner.has_service(name).await
    }

    async fn services(&self) -> Vec<ServiceName> {
        self.inner.services().await
    }

    async fn call(
        &self,
        name: &ServiceName,
        data: serde_json::Value,
    ) -> Result<(), ServiceCallError> {
        self.inner.call(name, data).await
    }
}

/// Allows every path below `/allowed`
pub struct AllowedPrefix(pub PathBuf);

impl Default for AllowedPrefix {
    fn default() -> Self {
        Self(PathBuf::from("/allowed"))
    }
}

impl PathPolicy for AllowedPrefix {
    fn is_allowed_path(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }
}

/// Counts events logged at error level
#[derive(Debug, Clone, Default)]
pub struct ErrorCounter {
    count: Arc<AtomicUsize>,
}

impl ErrorCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Install as the thread's default subscriber for as long as the guard lives.
    ///
    /// Only sees events from the current thread, so use it from
    /// current-thread tokio tests.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::set_default(subscriber)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn user_input(access_key_id: &str) -> UserInput {
    UserInput {
        region_name: Some("us-east-1".to_string()),
        aws_access_key_id: Some(access_key_id.to_string()),
        aws_secret_access_key: Some("wJalrXUtnFEMI/K7MDENG".to_string()),
        endpoint_url: None,
    }
}
