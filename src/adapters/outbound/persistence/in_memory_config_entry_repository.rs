use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{models::ConfigEntry, value_objects::EntryId},
    ports::repositories::{ConfigEntryRepository, RepositoryError, RepositoryResult},
};

/// In-memory implementation of ConfigEntryRepository for testing and development
#[derive(Clone, Default)]
pub struct InMemoryConfigEntryRepository {
    // Creation order is kept; list() returns entries in it
    entries: Arc<RwLock<Vec<ConfigEntry>>>,
}

impl InMemoryConfigEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with already persisted entries
    pub fn with_entries(entries: Vec<ConfigEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub(crate) async fn snapshot(&self) -> Vec<ConfigEntry> {
        self.entries.read().await.clone()
    }

    pub(crate) async fn replace(&self, entries: Vec<ConfigEntry>) {
        *self.entries.write().await = entries;
    }
}

#[async_trait]
impl ConfigEntryRepository for InMemoryConfigEntryRepository {
    async fn add(&self, entry: ConfigEntry) -> RepositoryResult<()> {
        let mut entries = self.entries.write().await;
        if entries
            .iter()
            .any(|e| e.domain == entry.domain && e.unique_id == entry.unique_id)
        {
            return Err(RepositoryError::DuplicateUniqueId(entry.unique_id));
        }
        entries.push(entry);
        Ok(())
    }

    async fn update(&self, entry: ConfigEntry) -> RepositoryResult<()> {
        let mut entries = self.entries.write().await;
        let slot = entries
            .iter_mut()
            .find(|e| e.entry_id == entry.entry_id)
            .ok_or(RepositoryError::NotFound(entry.entry_id))?;
        *slot = entry;
        Ok(())
    }

    async fn remove(&self, entry_id: &EntryId) -> RepositoryResult<ConfigEntry> {
        let mut entries = self.entries.write().await;
        let index = entries
            .iter()
            .position(|e| e.entry_id == *entry_id)
            .ok_or(RepositoryError::NotFound(*entry_id))?;
        Ok(entries.remove(index))
    }

    async fn get(&self, entry_id: &EntryId) -> RepositoryResult<Option<ConfigEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|e| e.entry_id == *entry_id)
            .cloned())
    }

    async fn list(&self, domain: &str) -> RepositoryResult<Vec<ConfigEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.domain == domain)
            .cloned()
            .collect())
    }

    async fn find_by_unique_id(
        &self,
        domain: &str,
        unique_id: &str,
    ) -> RepositoryResult<Option<ConfigEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|e| e.domain == domain && e.unique_id == unique_id)
            .cloned())
    }
}
