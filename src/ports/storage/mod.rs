mod object_storage_client;

pub use object_storage_client::{ObjectStorageClient, StorageClientFactory};
