use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    // Service handlers
    call_service,
    // Config entry handlers
    delete_entry,
    // Event handlers
    event_stream,
    get_options_form,
    get_user_form,
    list_entries,
    list_services,
    submit_options_form,
    submit_user_form,
};
use crate::{
    adapters::outbound::host::BroadcastEventBus,
    ports::{host::ServiceRegistry, services::ConfigFlowService},
};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub service_registry: Arc<dyn ServiceRegistry>,
    pub config_flow: Arc<dyn ConfigFlowService>,
    pub event_bus: BroadcastEventBus,
}

/// Create the host API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Services
        .route("/api/services", get(list_services))
        .route(
            "/api/services/{domain}/{service}",
            axum::routing::post(call_service),
        )
        // Events
        .route("/api/events", get(event_stream))
        // Config entries
        .route(
            "/api/config/config_entries/flow",
            get(get_user_form).post(submit_user_form),
        )
        .route("/api/config/config_entries/entry", get(list_entries))
        .route(
            "/api/config/config_entries/entry/{entry_id}",
            delete(delete_entry),
        )
        .route(
            "/api/config/config_entries/options/{entry_id}",
            get(get_options_form).post(submit_options_form),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::{
            host::{AllowListPathPolicy, InMemoryServiceRegistry},
            persistence::InMemoryConfigEntryRepository,
            storage::InMemoryClientFactory,
        },
        services::{ConfigFlowServiceImpl, ConnectionRegistry, ObjectActionServiceImpl, S3Integration},
    };
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let connections = ConnectionRegistry::new();
        let event_bus = BroadcastEventBus::new();
        let service_registry: Arc<dyn ServiceRegistry> = Arc::new(InMemoryServiceRegistry::new());
        let actions = Arc::new(ObjectActionServiceImpl::new(
            connections.clone(),
            Arc::new(AllowListPathPolicy::new(Vec::<std::path::PathBuf>::new())),
            Arc::new(event_bus.clone()),
        ));
        let integration = Arc::new(S3Integration::new(
            connections,
            Arc::new(InMemoryClientFactory::new()),
            service_registry.clone(),
            actions,
        ));
        AppState {
            service_registry,
            config_flow: Arc::new(ConfigFlowServiceImpl::new(
                Arc::new(InMemoryConfigEntryRepository::new()),
                integration,
            )),
            event_bus,
        }
    }

    #[tokio::test]
    async fn test_event_stream_is_sse() {
        let router = create_router(test_state());

        let response = router
            .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/event-stream");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = create_router(test_state());

        let response = router
            .oneshot(Request::get("/api/objects").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
