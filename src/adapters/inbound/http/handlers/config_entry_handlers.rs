use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    adapters::inbound::http::{
        dto::{ConfigEntryDto, ErrorResponseDto, SuccessResponseDto},
        router::AppState,
    },
    domain::{
        models::{FlowResult, OptionsInput, UserInput},
        value_objects::EntryId,
    },
    ports::services::ConfigFlowError,
};

type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn flow_error(error: ConfigFlowError) -> ApiError {
    let status = match &error {
        ConfigFlowError::UnknownEntry(_) => StatusCode::NOT_FOUND,
        ConfigFlowError::Setup(_) => StatusCode::BAD_REQUEST,
        ConfigFlowError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponseDto::from_config_flow_error(&error)))
}

fn parse_entry_id(raw: &str) -> Result<EntryId, ApiError> {
    raw.parse().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::from_validation_error("entry_id", e)),
        )
    })
}

/// Show the create form
pub async fn get_user_form(State(app_state): State<AppState>) -> Json<FlowResult> {
    Json(app_state.config_flow.user_form())
}

/// Submit the create form
pub async fn submit_user_form(
    State(app_state): State<AppState>,
    Json(input): Json<UserInput>,
) -> Result<Json<FlowResult>, ApiError> {
    let result = app_state.config_flow.step_user(input).await.map_err(flow_error)?;
    Ok(Json(result.redacted()))
}

/// List config entries
pub async fn list_entries(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ConfigEntryDto>>, ApiError> {
    let entries = app_state.config_flow.entries().await.map_err(flow_error)?;
    Ok(Json(entries.into_iter().map(ConfigEntryDto::from).collect()))
}

/// Remove a config entry
pub async fn delete_entry(
    State(app_state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<Json<SuccessResponseDto>, ApiError> {
    let entry_id = parse_entry_id(&entry_id)?;
    let entry = app_state
        .config_flow
        .remove_entry(&entry_id)
        .await
        .map_err(flow_error)?;
    let message = format!("Removed config entry {}", entry.title);
    let data = serde_json::to_value(ConfigEntryDto::from(entry)).unwrap_or_default();
    Ok(Json(SuccessResponseDto::with_data(&message, data)))
}

/// Show the options form of an entry
pub async fn get_options_form(
    State(app_state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<Json<FlowResult>, ApiError> {
    let entry_id = parse_entry_id(&entry_id)?;
    let result = app_state
        .config_flow
        .options_form(&entry_id)
        .await
        .map_err(flow_error)?;
    Ok(Json(result))
}

/// Submit the options form of an entry
pub async fn submit_options_form(
    State(app_state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(input): Json<OptionsInput>,
) -> Result<Json<FlowResult>, ApiError> {
    let entry_id = parse_entry_id(&entry_id)?;
    let result = app_state
        .config_flow
        .step_options(&entry_id, input)
        .await
        .map_err(flow_error)?;
    Ok(Json(result.redacted()))
}
