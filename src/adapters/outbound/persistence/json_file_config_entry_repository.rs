use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::InMemoryConfigEntryRepository;
use crate::{
    domain::{models::ConfigEntry, value_objects::EntryId},
    ports::repositories::{ConfigEntryRepository, RepositoryResult},
};

const STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StorageFile {
    version: u32,
    entries: Vec<ConfigEntry>,
}

/// Config entries persisted as a JSON document.
///
/// The document is rewritten after every change, via a temporary file and
/// a rename so a crash never leaves a truncated file behind.
pub struct JsonFileConfigEntryRepository {
    path: PathBuf,
    cache: InMemoryConfigEntryRepository,
    write_lock: Mutex<()>,
}

impl JsonFileConfigEntryRepository {
    /// Load entries from `path`; a missing file means no entries yet
    pub async fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(raw) => serde_json::from_slice::<StorageFile>(&raw)?.entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), count = entries.len(), "Loaded config entries");

        Ok(Self {
            path,
            cache: InMemoryConfigEntryRepository::with_entries(entries),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A scratch copy of the current entries to apply one change to
    async fn stage(&self) -> InMemoryConfigEntryRepository {
        InMemoryConfigEntryRepository::with_entries(self.cache.snapshot().await)
    }

    /// Write the staged entries to disk, then make them visible.
    ///
    /// Callers hold `write_lock`; on a failed write the cache is untouched.
    async fn commit(&self, staged: InMemoryConfigEntryRepository) -> RepositoryResult<()> {
        let entries = staged.snapshot().await;
        self.write_file(&entries).await?;
        self.cache.replace(entries).await;
        Ok(())
    }

    async fn write_file(&self, entries: &[ConfigEntry]) -> RepositoryResult<()> {
        let document = StorageFile {
            version: STORAGE_VERSION,
            entries: entries.to_vec(),
        };
        let raw = serde_json::to_vec_pretty(&document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "Config entries saved");
        Ok(())
    }
}

#[async_trait]
impl ConfigEntryRepository for JsonFileConfigEntryRepository {
    async fn add(&self, entry: ConfigEntry) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        staged.add(entry).await?;
        self.commit(staged).await
    }

    async fn update(&self, entry: ConfigEntry) -> RepositoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        staged.update(entry).await?;
        self.commit(staged).await
    }

    async fn remove(&self, entry_id: &EntryId) -> RepositoryResult<ConfigEntry> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let removed = staged.remove(entry_id).await?;
        self.commit(staged).await?;
        Ok(removed)
    }

    async fn get(&self, entry_id: &EntryId) -> RepositoryResult<Option<ConfigEntry>> {
        self.cache.get(entry_id).await
    }

    async fn list(&self, domain: &str) -> RepositoryResult<Vec<ConfigEntry>> {
        self.cache.list(domain).await
    }

    async fn find_by_unique_id(
        &self,
        domain: &str,
        unique_id: &str,
    ) -> RepositoryResult<Option<ConfigEntry>> {
        self.cache.find_by_unique_id(domain, unique_id).await
    }
}
