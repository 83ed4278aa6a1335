// HTTP request handlers standing in for the dashboard host runtime
use crate::application::telemetry_component::ComponentError;
use crate::domain::stove::ControlError;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct BurnLevelRequest {
    pub level: i64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn attach(State(state): State<Arc<AppState>>) -> Response {
    match state.component.attach() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => component_error(e),
    }
}

pub async fn detach(State(state): State<Arc<AppState>>) -> Response {
    match state.component.detach() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => component_error(e),
    }
}

/// Push a raw host snapshot into the component
pub async fn push_snapshot(State(state): State<Arc<AppState>>, Json(raw): Json<Value>) -> Response {
    match state.component.update(&raw) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => component_error(e),
    }
}

pub async fn current_view(State(state): State<Arc<AppState>>) -> Response {
    Json(state.component.current_view()).into_response()
}

pub async fn control_view(State(state): State<Arc<AppState>>) -> Response {
    Json(state.component.control_view()).into_response()
}

/// Fire-and-forget: 202 as soon as the request is queued
pub async fn set_burn_level(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BurnLevelRequest>,
) -> Response {
    let Some(sensor_id) = state.component.burn_level_sensor() else {
        return error_body(StatusCode::CONFLICT, "no burn_level binding configured");
    };

    match state
        .control_service
        .request_burn_level(&sensor_id, request.level)
    {
        Ok(command) => (StatusCode::ACCEPTED, Json(command)).into_response(),
        Err(e @ ControlError::InvalidBurnLevel(_)) => {
            tracing::warn!("Rejected burn level request: {}", e);
            error_body(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string())
        }
    }
}

fn component_error(e: ComponentError) -> Response {
    let status = match &e {
        ComponentError::InvalidSnapshot(_) => {
            tracing::warn!("Skipping snapshot: {}", e);
            StatusCode::BAD_REQUEST
        }
        ComponentError::NotAttached => {
            tracing::error!("Snapshot delivered to a detached component");
            StatusCode::CONFLICT
        }
        ComponentError::OrderingViolation(_) => StatusCode::CONFLICT,
    };
    error_body(status, &e.to_string())
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
