mod in_memory_client;

pub use in_memory_client::{InMemoryClientFactory, InMemoryObjectStorageClient, StoredObject};
