use crate::domain::{errors::StorageError, value_objects::BucketName};

/// Convert an object_store failure into a domain storage error for `bucket`
pub fn map_store_error(bucket: &BucketName, err: object_store::Error) -> StorageError {
    match err {
        object_store::Error::NotFound { path, .. } => StorageError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: path,
        },
        object_store::Error::PermissionDenied { .. } | object_store::Error::Unauthenticated { .. } => {
            StorageError::AccessDenied {
                message: err.to_string(),
            }
        }
        object_store::Error::NotSupported { .. } | object_store::Error::NotImplemented => {
            StorageError::UnsupportedOperation {
                operation: "object_store".to_string(),
                reason: err.to_string(),
            }
        }
        _ => StorageError::StorageBackendError {
            message: err.to_string(),
        },
    }
}
