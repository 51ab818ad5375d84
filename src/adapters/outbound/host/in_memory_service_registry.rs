use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::ports::host::{
    ServiceCall, ServiceCallError, ServiceHandler, ServiceName, ServiceRegistry,
};

/// Service registry kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryServiceRegistry {
    handlers: Arc<RwLock<HashMap<ServiceName, Arc<dyn ServiceHandler>>>>,
}

impl InMemoryServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryServiceRegistry {
    async fn register(&self, name: ServiceName, handler: Arc<dyn ServiceHandler>) {
        debug!(service = %name, "Registering service");
        if self.handlers.write().await.insert(name.clone(), handler).is_some() {
            warn!(service = %name, "Service was already registered, handler replaced");
        }
    }

    async fn remove(&self, name: &ServiceName) -> bool {
        let removed = self.handlers.write().await.remove(name).is_some();
        if removed {
            debug!(service = %name, "Removed service");
        }
        removed
    }

    async fn has_service(&self, name: &ServiceName) -> bool {
        self.handlers.read().await.contains_key(name)
    }

    async fn services(&self) -> Vec<ServiceName> {
        let mut names: Vec<_> = self.handlers.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    async fn call(&self, name: &ServiceName, data: serde_json::Value) -> Result<(), ServiceCallError> {
        // Release the lock before running the handler; handlers may touch the registry
        let handler = self
            .handlers
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceCallError::ServiceNotFound(name.clone()))?;

        handler
            .handle(ServiceCall {
                domain: name.domain.clone(),
                service: name.service.clone(),
                data,
            })
            .await;
        Ok(())
    }
}
