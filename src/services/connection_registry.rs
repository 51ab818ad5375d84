use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{domain::value_objects::EntryId, ports::storage::ObjectStorageClient};

type Connection = (EntryId, Arc<dyn ObjectStorageClient>);

/// Storage clients of the enabled config entries, in the order they were enabled
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<RwLock<Vec<Connection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client, replacing any client already held for the entry
    pub async fn insert(&self, entry_id: EntryId, client: Arc<dyn ObjectStorageClient>) {
        let mut connections = self.connections.write().await;
        match connections.iter_mut().find(|(id, _)| *id == entry_id) {
            Some(slot) => slot.1 = client,
            None => connections.push((entry_id, client)),
        }
    }

    pub async fn remove(&self, entry_id: &EntryId) -> Option<Arc<dyn ObjectStorageClient>> {
        let mut connections = self.connections.write().await;
        let index = connections.iter().position(|(id, _)| id == entry_id)?;
        Some(connections.remove(index).1)
    }

    pub async fn get(&self, entry_id: &EntryId) -> Option<Arc<dyn ObjectStorageClient>> {
        self.connections
            .read()
            .await
            .iter()
            .find(|(id, _)| id == entry_id)
            .map(|(_, client)| client.clone())
    }

    /// The earliest enabled connection still registered
    pub async fn first(&self) -> Option<Connection> {
        self.connections.read().await.first().cloned()
    }

    pub async fn contains(&self, entry_id: &EntryId) -> bool {
        self.get(entry_id).await.is_some()
    }

    pub async fn entry_ids(&self) -> Vec<EntryId> {
        self.connections
            .read()
            .await
            .iter()
            .map(|(id, _)| *id)
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
