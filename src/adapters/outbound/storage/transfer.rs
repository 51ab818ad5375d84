//! Upload and copy routines shared by the object_store backed clients.

use std::sync::Arc;

use futures::StreamExt;
use object_store::{
    buffered::BufWriter, path::Path as ObjectPath, Attribute, Attributes, ObjectStore, TagSet,
};
use tokio::io::AsyncWriteExt;

use super::error::map_store_error;
use crate::domain::{
    errors::{StorageError, StorageResult},
    models::{CopyObjectRequest, PutObjectRequest},
    value_objects::{ObjectKey, ObjectTags},
};

/// The store path for `key`, byte for byte.
///
/// `ObjectPath::from` would percent-encode characters such as `[` or `#`
/// and store the object under a different name.
pub(crate) fn object_path(key: &ObjectKey) -> StorageResult<ObjectPath> {
    ObjectPath::parse(key.as_str()).map_err(|e| StorageError::StorageBackendError {
        message: format!("Object key {} is not a valid store path: {}", key, e),
    })
}

/// The `ExtraArgs` of an upload: storage class and optional content type
pub(crate) fn put_attributes(request: &PutObjectRequest) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(
        Attribute::StorageClass,
        request.storage_class.as_str().into(),
    );
    if let Some(content_type) = &request.content_type {
        attributes.insert(Attribute::ContentType, content_type.clone().into());
    }
    attributes
}

pub(crate) fn tag_set(tags: &ObjectTags) -> TagSet {
    let mut set = TagSet::default();
    for (key, value) in tags.iter() {
        set.push(key, value);
    }
    set
}

/// Stream a local file into `store`, switching to multipart for large files
pub(crate) async fn upload_file(
    store: Arc<dyn ObjectStore>,
    request: &PutObjectRequest,
) -> StorageResult<()> {
    let unreadable = |err: std::io::Error| StorageError::FileUnreadable {
        path: request.file_path.display().to_string(),
        message: err.to_string(),
    };

    let mut file = tokio::fs::File::open(&request.file_path)
        .await
        .map_err(unreadable)?;

    let mut writer = BufWriter::new(store, object_path(&request.key)?)
        .with_attributes(put_attributes(request))
        .with_tags(tag_set(&request.tags));

    if let Err(err) = tokio::io::copy(&mut file, &mut writer).await {
        // Discard any multipart upload already started
        let _ = writer.abort().await;
        return Err(io_to_storage_error(request, err));
    }
    writer
        .shutdown()
        .await
        .map_err(|err| io_to_storage_error(request, err))
}

/// BufWriter reports backend failures as io errors wrapping object_store::Error
fn io_to_storage_error(request: &PutObjectRequest, err: std::io::Error) -> StorageError {
    let message = err.to_string();
    match into_store_error(err) {
        Some(store_err) => map_store_error(&request.bucket, store_err),
        None => StorageError::FileUnreadable {
            path: request.file_path.display().to_string(),
            message,
        },
    }
}

fn into_store_error(err: std::io::Error) -> Option<object_store::Error> {
    err.into_inner()
        .and_then(|inner| inner.downcast::<object_store::Error>().ok())
        .map(|store_err| *store_err)
}

/// Copy between two stores by streaming the source into the destination.
///
/// Object attributes travel with the data; large objects go up as multipart.
pub(crate) async fn copy_across(
    source: &dyn ObjectStore,
    destination: Arc<dyn ObjectStore>,
    request: &CopyObjectRequest,
) -> StorageResult<()> {
    let result = source
        .get(&object_path(&request.source_key)?)
        .await
        .map_err(|e| map_store_error(&request.source_bucket, e))?;
    let attributes = result.attributes.clone();
    let mut chunks = result.into_stream();

    let mut writer = BufWriter::new(destination, object_path(&request.destination_key)?)
        .with_attributes(attributes);

    while let Some(chunk) = chunks.next().await {
        let written = match chunk {
            Ok(chunk) => writer
                .put(chunk)
                .await
                .map_err(|e| map_store_error(&request.destination_bucket, e)),
            Err(e) => Err(map_store_error(&request.source_bucket, e)),
        };
        if let Err(err) = written {
            let _ = writer.abort().await;
            return Err(err);
        }
    }

    writer.shutdown().await.map_err(|err| {
        let message = err.to_string();
        match into_store_error(err) {
            Some(store_err) => map_store_error(&request.destination_bucket, store_err),
            None => StorageError::StorageBackendError { message },
        }
    })
}
