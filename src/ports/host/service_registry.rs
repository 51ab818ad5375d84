use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// A dispatched call of a registered service
#[derive(Debug, Clone)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: serde_json::Value,
}

/// Receives calls for one registered service
#[async_trait]
pub trait ServiceHandler: Send + Sync + 'static {
    async fn handle(&self, call: ServiceCall);
}

/// A (domain, service) pair known to the registry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ServiceName {
    pub domain: String,
    pub service: String,
}

impl ServiceName {
    pub fn new(domain: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.domain, self.service)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceCallError {
    #[error("Service {0} not found")]
    ServiceNotFound(ServiceName),
}

/// Host registry through which actions are exposed and dispatched
#[async_trait]
pub trait ServiceRegistry: Send + Sync + 'static {
    async fn register(&self, name: ServiceName, handler: Arc<dyn ServiceHandler>);

    /// Remove a service; returns false if it was not registered
    async fn remove(&self, name: &ServiceName) -> bool;

    async fn has_service(&self, name: &ServiceName) -> bool;

    /// All registered services, sorted
    async fn services(&self) -> Vec<ServiceName>;

    /// Dispatch a call and wait for the handler to finish
    async fn call(&self, name: &ServiceName, data: serde_json::Value) -> Result<(), ServiceCallError>;
}
