// Shared handle for hosts that reach the component from several tasks
use crate::application::telemetry_component::{ComponentError, TelemetryComponent};
use crate::domain::dashboard::{ControlPanelView, DashboardView};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, TryLockError};

/// Mutating calls never wait: if another call is still running they fail
/// with `OrderingViolation` instead of interleaving with it.
pub struct SharedTelemetryComponent {
    inner: Mutex<TelemetryComponent>,
}

impl SharedTelemetryComponent {
    pub fn new(component: TelemetryComponent) -> Self {
        Self {
            inner: Mutex::new(component),
        }
    }

    pub fn attach(&self) -> Result<(), ComponentError> {
        self.exclusive("attach() while another call is in flight")?.attach();
        Ok(())
    }

    pub fn update(&self, raw: &Value) -> Result<(), ComponentError> {
        self.exclusive("update() while another call is in flight")?.update(raw)
    }

    pub fn detach(&self) -> Result<(), ComponentError> {
        self.exclusive("detach() while an update is in flight")?.detach();
        Ok(())
    }

    pub fn current_view(&self) -> DashboardView {
        self.lock().current_view()
    }

    pub fn control_view(&self) -> ControlPanelView {
        self.lock().control_view()
    }

    pub fn burn_level_sensor(&self) -> Option<String> {
        self.lock()
            .config()
            .binding(crate::infrastructure::config::BURN_LEVEL)
            .map(str::to_string)
    }

    fn exclusive(&self, violation: &'static str) -> Result<MutexGuard<'_, TelemetryComponent>, ComponentError> {
        match self.inner.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::Poisoned(poisoned)) => Ok(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {
                tracing::error!("Rejected call: {}", violation);
                Err(ComponentError::OrderingViolation(violation))
            }
        }
    }

    /// Queries may wait for a running call to finish
    fn lock(&self) -> MutexGuard<'_, TelemetryComponent> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
