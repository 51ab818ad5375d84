/// Errors surfaced by the object storage backend
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Object not found
    ObjectNotFound { bucket: String, key: String },

    /// Access denied by the backend (bad credentials, missing permission)
    AccessDenied { message: String },

    /// Local file could not be read for upload
    FileUnreadable { path: String, message: String },

    /// Client could not be constructed from the connection settings
    ClientConfiguration { message: String },

    /// Operation not supported by this backend
    UnsupportedOperation { operation: String, reason: String },

    /// Storage backend error
    StorageBackendError { message: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::AccessDenied { message } => {
                write!(f, "Access denied: {}", message)
            }
            StorageError::FileUnreadable { path, message } => {
                write!(f, "Cannot read file {}: {}", path, message)
            }
            StorageError::ClientConfiguration { message } => {
                write!(f, "Invalid client configuration: {}", message)
            }
            StorageError::UnsupportedOperation { operation, reason } => {
                write!(f, "Unsupported operation '{}': {}", operation, reason)
            }
            StorageError::StorageBackendError { message } => {
                write!(f, "Storage backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
