// Application state for HTTP handlers
use crate::application::control_service::ControlService;
use crate::application::shared_component::SharedTelemetryComponent;

pub struct AppState {
    pub component: SharedTelemetryComponent,
    pub control_service: ControlService,
}
