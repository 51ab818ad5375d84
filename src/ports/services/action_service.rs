use async_trait::async_trait;

use crate::domain::{
    errors::ActionResult,
    models::{CopyObjectParams, DeleteObjectParams, PresignParams, PutObjectParams},
};

/// The object actions exposed through the service registry.
///
/// Each call validates its parameters, picks a connection and makes exactly
/// one storage call. Failures come back typed; nothing is logged at error
/// level here so callers decide how failures surface.
#[async_trait]
pub trait ObjectActionService: Send + Sync + 'static {
    async fn put_object(&self, params: PutObjectParams) -> ActionResult<()>;

    async fn copy_object(&self, params: CopyObjectParams) -> ActionResult<()>;

    async fn delete_object(&self, params: DeleteObjectParams) -> ActionResult<()>;

    /// Returns the URL and publishes it on the event bus
    async fn generate_presigned_url(&self, params: PresignParams) -> ActionResult<String>;
}
