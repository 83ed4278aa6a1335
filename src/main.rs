// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use stove_telemetry::application::control_service::ControlService;
use stove_telemetry::application::shared_component::SharedTelemetryComponent;
use stove_telemetry::application::stove_actuator::StoveActuator;
use stove_telemetry::application::telemetry_component::TelemetryComponent;
use stove_telemetry::infrastructure::config::load_card_config;
use stove_telemetry::infrastructure::headless_surface::HeadlessSurface;
use stove_telemetry::infrastructure::stove_api::{HttpStoveActuator, LoggingActuator};
use stove_telemetry::presentation::app_state::AppState;
use stove_telemetry::presentation::handlers::{
    attach, control_view, current_view, detach, health_check, push_snapshot, set_burn_level,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let card_config = load_card_config()?;
    let addr: SocketAddr = card_config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", card_config.server.bind))?;

    // Actuation collaborator (infrastructure layer)
    let actuator: Arc<dyn StoveActuator> = match &card_config.stove_api {
        Some(api) => Arc::new(HttpStoveActuator::new(
            &api.host,
            Duration::from_secs(api.request_timeout_secs),
        )?),
        None => {
            tracing::warn!("No [stove_api] configured, burn level requests will only be logged");
            Arc::new(LoggingActuator)
        }
    };

    // Create component and services (application layer)
    let component = TelemetryComponent::new(card_config, Arc::new(HeadlessSurface::default()))
        .context("Invalid card configuration")?;

    let state = Arc::new(AppState {
        component: SharedTelemetryComponent::new(component),
        control_service: ControlService::new(actuator),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/attach", post(attach))
        .route("/detach", post(detach))
        .route("/snapshot", post(push_snapshot))
        .route("/view", get(current_view))
        .route("/control", get(control_view))
        .route("/burn-level", post(set_burn_level))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Starting stove-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
