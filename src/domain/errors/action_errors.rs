use thiserror::Error;

use super::{StorageError, ValidationError};
use crate::domain::value_objects::EntryId;

/// Why an object action did not complete.
///
/// Everything before [`ActionError::Storage`] is raised before the
/// storage backend is contacted.
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    #[error("Invalid storage class {0}")]
    InvalidStorageClass(String),

    #[error("Invalid file_path {0}")]
    PathNotAllowed(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid {field}: {source}")]
    InvalidParameter {
        field: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("S3 client instance not found")]
    NoConnection,

    #[error("S3 client instance not found for config entry {0}")]
    ConnectionNotFound(EntryId),

    #[error("S3 {operation} error: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },
}

impl ActionError {
    pub fn invalid(field: &'static str, source: ValidationError) -> Self {
        ActionError::InvalidParameter { field, source }
    }

    pub fn storage(operation: &'static str, source: StorageError) -> Self {
        ActionError::Storage { operation, source }
    }

    /// Whether the failure happened before any backend call was made
    pub fn is_rejected_locally(&self) -> bool {
        !matches!(self, ActionError::Storage { .. })
    }
}

/// Result type for object actions
pub type ActionResult<T> = Result<T, ActionError>;
