use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::{
    adapters::inbound::http::{
        dto::{ErrorResponseDto, ServiceDto, SuccessResponseDto},
        router::AppState,
    },
    ports::host::ServiceName,
};

/// List registered services
pub async fn list_services(State(app_state): State<AppState>) -> Json<Vec<ServiceDto>> {
    let services = app_state.service_registry.services().await;
    Json(services.into_iter().map(ServiceDto::from).collect())
}

/// Call a service.
///
/// Answers 200 once the handler ran, whether or not the action succeeded;
/// action failures only show up in the server log.
pub async fn call_service(
    State(app_state): State<AppState>,
    Path((domain, service)): Path<(String, String)>,
    Json(data): Json<serde_json::Value>,
) -> Result<Json<SuccessResponseDto>, (StatusCode, Json<ErrorResponseDto>)> {
    let name = ServiceName::new(domain, service);
    debug!(service = %name, "Service call received");

    app_state
        .service_registry
        .call(&name, data)
        .await
        .map_err(|e| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponseDto::from_service_call_error(e)),
            )
        })?;

    Ok(Json(SuccessResponseDto::new(&format!("Called {}", name))))
}
