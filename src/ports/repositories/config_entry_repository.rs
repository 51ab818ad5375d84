use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{models::ConfigEntry, value_objects::EntryId};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Config entry {0} not found")]
    NotFound(EntryId),

    #[error("Config entry with unique id {0} already exists")]
    DuplicateUniqueId(String),

    #[error("Config entry storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config entry serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence of config entries
#[async_trait]
pub trait ConfigEntryRepository: Send + Sync + 'static {
    /// Store a new entry; unique ids must not repeat within a domain
    async fn add(&self, entry: ConfigEntry) -> RepositoryResult<()>;

    /// Replace an existing entry
    async fn update(&self, entry: ConfigEntry) -> RepositoryResult<()>;

    async fn remove(&self, entry_id: &EntryId) -> RepositoryResult<ConfigEntry>;

    async fn get(&self, entry_id: &EntryId) -> RepositoryResult<Option<ConfigEntry>>;

    /// Entries of a domain in creation order
    async fn list(&self, domain: &str) -> RepositoryResult<Vec<ConfigEntry>>;

    async fn find_by_unique_id(
        &self,
        domain: &str,
        unique_id: &str,
    ) -> RepositoryResult<Option<ConfigEntry>>;
}
