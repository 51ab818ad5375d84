use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::ConnectionRegistry;
use crate::{
    domain::{
        errors::{ActionError, StorageResult},
        models::{ConfigEntry, DOMAIN},
        value_objects::EntryId,
    },
    ports::{
        host::{ServiceCall, ServiceHandler, ServiceName, ServiceRegistry},
        services::ObjectActionService,
        storage::StorageClientFactory,
    },
};

/// Actions registered under the `s3` domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Put,
    Copy,
    Delete,
    SignedUrl,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Put, Action::Copy, Action::Delete, Action::SignedUrl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Put => "put",
            Action::Copy => "copy",
            Action::Delete => "delete",
            Action::SignedUrl => "signed_url",
        }
    }

    pub fn service_name(&self) -> ServiceName {
        ServiceName::new(DOMAIN, self.as_str())
    }
}

#[derive(Debug, Error)]
enum HandlerError {
    #[error("invalid service data: {0}")]
    InvalidData(#[from] serde_json::Error),

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Service registry entry for one action.
///
/// Failures end here: they are logged once at error level and the call
/// returns normally, so the host never sees them.
pub struct ActionHandler {
    action: Action,
    actions: Arc<dyn ObjectActionService>,
}

impl ActionHandler {
    pub fn new(action: Action, actions: Arc<dyn ObjectActionService>) -> Self {
        Self { action, actions }
    }

    async fn run(&self, data: serde_json::Value) -> Result<(), HandlerError> {
        match self.action {
            Action::Put => self.actions.put_object(serde_json::from_value(data)?).await?,
            Action::Copy => self.actions.copy_object(serde_json::from_value(data)?).await?,
            Action::Delete => self.actions.delete_object(serde_json::from_value(data)?).await?,
            Action::SignedUrl => {
                self.actions
                    .generate_presigned_url(serde_json::from_value(data)?)
                    .await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceHandler for ActionHandler {
    async fn handle(&self, call: ServiceCall) {
        if let Err(err) = self.run(call.data).await {
            error!(service = %self.action.service_name(), "{}", err);
        }
    }
}

/// Enables and disables config entries.
///
/// Actions are registered with the first enabled entry and removed with the
/// last one.
pub struct S3Integration {
    connections: ConnectionRegistry,
    client_factory: Arc<dyn StorageClientFactory>,
    service_registry: Arc<dyn ServiceRegistry>,
    actions: Arc<dyn ObjectActionService>,
    lifecycle: Mutex<()>,
}

impl S3Integration {
    pub fn new(
        connections: ConnectionRegistry,
        client_factory: Arc<dyn StorageClientFactory>,
        service_registry: Arc<dyn ServiceRegistry>,
        actions: Arc<dyn ObjectActionService>,
    ) -> Self {
        Self {
            connections,
            client_factory,
            service_registry,
            actions,
            lifecycle: Mutex::new(()),
        }
    }

    /// Build the entry's client and expose the actions
    pub async fn setup_entry(&self, entry: &ConfigEntry) -> StorageResult<()> {
        let _guard = self.lifecycle.lock().await;

        debug!(
            entry_id = %entry.entry_id,
            "AWS config for entry [{}]: {:?}", entry.title, entry.data
        );
        let client = self.client_factory.create_client(&entry.data)?;
        self.connections.insert(entry.entry_id, client).await;
        self.register_actions().await;

        info!(entry_id = %entry.entry_id, "Set up S3 config entry {}", entry.title);
        Ok(())
    }

    /// Drop the entry's client; returns false if it was not enabled
    pub async fn unload_entry(&self, entry_id: &EntryId) -> bool {
        let _guard = self.lifecycle.lock().await;

        if !self.disable(entry_id).await {
            return false;
        }

        info!(%entry_id, "Unloaded S3 config entry");
        true
    }

    /// Rebuild the entry's client from updated data.
    ///
    /// The new client replaces the old one in place, so the actions stay
    /// registered throughout. If the new client cannot be built the entry
    /// ends up unloaded.
    pub async fn reload_entry(&self, entry: &ConfigEntry) -> StorageResult<()> {
        let _guard = self.lifecycle.lock().await;

        let client = match self.client_factory.create_client(&entry.data) {
            Ok(client) => client,
            Err(err) => {
                self.disable(&entry.entry_id).await;
                return Err(err);
            }
        };
        self.connections.insert(entry.entry_id, client).await;
        self.register_actions().await;

        info!(entry_id = %entry.entry_id, "Reloaded S3 config entry {}", entry.title);
        Ok(())
    }

    async fn register_actions(&self) {
        for action in Action::ALL {
            let name = action.service_name();
            if !self.service_registry.has_service(&name).await {
                let handler = Arc::new(ActionHandler::new(action, self.actions.clone()));
                self.service_registry.register(name, handler).await;
            }
        }
    }

    /// Remove the entry's client, and the actions with the last one.
    /// Callers hold `lifecycle`.
    async fn disable(&self, entry_id: &EntryId) -> bool {
        if self.connections.remove(entry_id).await.is_none() {
            return false;
        }

        if self.connections.is_empty().await {
            for action in Action::ALL {
                self.service_registry.remove(&action.service_name()).await;
            }
            debug!("Last S3 config entry unloaded, actions removed");
        }
        true
    }

    pub async fn is_loaded(&self, entry_id: &EntryId) -> bool {
        self.connections.contains(entry_id).await
    }

    pub async fn loaded_entries(&self) -> usize {
        self.connections.len().await
    }
}
