// Telemetry visualization component - attach/update/detach lifecycle around the chart model
use crate::application::chart_model::{ChartModel, TrackedSeries};
use crate::application::chart_surface::{ChartSurface, SurfaceLease};
use crate::application::snapshot_adapter::normalize;
use crate::application::stats::{StatsSensors, derive_stats};
use crate::domain::dashboard::{AxisCache, ComponentState, ControlPanelView, DashboardView, DerivedStats};
use crate::domain::stove::{BurnLevel, DoorState, StovePhase};
use crate::infrastructure::config::{
    ACTIVE_TIME, BURN_LEVEL, CardConfig, ConfigError, DOOR_SENSOR, EFFICIENCY, OXYGEN_LEVEL, PHASE,
    ROOM_TEMPERATURE, STOVE_TEMPERATURE,
};
use crate::infrastructure::raw_state::RawSnapshot;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ComponentError {
    /// Recoverable: the host should log it and try again on the next tick
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    /// Call-order bug in the host
    #[error("component is not attached")]
    NotAttached,
    #[error("ordering violation: {0}")]
    OrderingViolation(&'static str),
}

/// Owns the chart model between `attach` and `detach`.
///
/// `update` is synchronous and must not be called concurrently; the host
/// delivers snapshots one refresh tick at a time. Use
/// [`SharedTelemetryComponent`](crate::application::shared_component::SharedTelemetryComponent)
/// when the host needs to share the component.
pub struct TelemetryComponent {
    config: CardConfig,
    tracked: Vec<TrackedSeries>,
    stats_sensors: StatsSensors,
    sensor_ids: Vec<String>,
    surface: Arc<dyn ChartSurface>,
    model: Option<ChartModel>,
}

impl TelemetryComponent {
    /// Fails here, never on the first update, when required bindings are missing.
    pub fn new(config: CardConfig, surface: Arc<dyn ChartSurface>) -> Result<Self, ConfigError> {
        config.validate()?;

        let bound = |name: &str| config.binding(name).map(str::to_string);

        let tracked: Vec<TrackedSeries> = config
            .series
            .iter()
            .filter_map(|s| {
                bound(&s.binding).map(|sensor_id| TrackedSeries {
                    sensor_id,
                    label: s.name.clone(),
                    color: s.color.clone(),
                })
            })
            .collect();

        let stats_sensors = StatsSensors {
            stove_temperature: bound(STOVE_TEMPERATURE).ok_or(ConfigError::MissingBinding(STOVE_TEMPERATURE))?,
            room_temperature: bound(ROOM_TEMPERATURE).ok_or(ConfigError::MissingBinding(ROOM_TEMPERATURE))?,
            door: bound(DOOR_SENSOR),
            oxygen: bound(OXYGEN_LEVEL),
            efficiency: bound(EFFICIENCY),
            active_time: bound(ACTIVE_TIME),
        };

        let mut sensor_ids: Vec<String> = config
            .sensor_bindings
            .values()
            .filter(|id| !id.trim().is_empty())
            .cloned()
            .collect();
        sensor_ids.sort();
        sensor_ids.dedup();

        Ok(Self {
            config,
            tracked,
            stats_sensors,
            sensor_ids,
            surface,
            model: None,
        })
    }

    pub fn state(&self) -> ComponentState {
        match &self.model {
            None => ComponentState::Detached,
            Some(model) if model.snapshot.is_none() => ComponentState::AwaitingData,
            Some(_) => ComponentState::Rendering,
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// No-op when already attached
    pub fn attach(&mut self) {
        if self.model.is_some() {
            tracing::debug!("attach() while attached, ignoring");
            return;
        }

        let lease = SurfaceLease::acquire(self.surface.clone());
        self.model = Some(ChartModel::new(&self.tracked, lease));
        tracing::info!("Telemetry component attached with {} series", self.tracked.len());
    }

    pub fn update(&mut self, raw: &Value) -> Result<(), ComponentError> {
        let model = self.model.as_mut().ok_or(ComponentError::NotAttached)?;
        let raw = RawSnapshot::from_value(raw).map_err(ComponentError::InvalidSnapshot)?;

        let snapshot = normalize(&raw, self.sensor_ids.iter().map(String::as_str));
        let stats = derive_stats(&snapshot, &self.stats_sensors, self.config.stats.upstream_fallback);
        model.replace(&self.tracked, snapshot, stats, &self.config.chart);

        tracing::debug!(
            "Snapshot applied: {} readings across {} series",
            model.series.iter().map(|s| s.readings.len()).sum::<usize>(),
            model.series.len()
        );
        Ok(())
    }

    /// Drops the chart model, which releases its surface lease
    pub fn detach(&mut self) {
        if self.model.take().is_some() {
            tracing::info!("Telemetry component detached");
        }
    }

    /// Cloned out so the rendering layer cannot reach the retained model
    pub fn current_view(&self) -> DashboardView {
        match &self.model {
            Some(model) => DashboardView {
                state: self.state(),
                series: model.series.clone(),
                axis: model.axis.clone(),
                stats: model.stats.clone(),
                tiles: model.stats.tiles(),
            },
            None => DashboardView {
                state: ComponentState::Detached,
                series: Vec::new(),
                axis: AxisCache::default(),
                stats: DerivedStats::default(),
                tiles: DerivedStats::default().tiles(),
            },
        }
    }

    /// Live values for the control card, read from the latest snapshot
    pub fn control_view(&self) -> ControlPanelView {
        let snapshot = self.model.as_ref().and_then(|m| m.snapshot.as_ref());
        let current = |name: &str| {
            let id = self.config.binding(name)?;
            snapshot?.current_value(id)
        };

        let burn_level = current(BURN_LEVEL).and_then(|v| BurnLevel::new(v.round() as i64).ok());
        let phase = StovePhase::from_code(current(PHASE));
        let door = DoorState::from_value(current(DOOR_SENSOR));

        ControlPanelView {
            stove_temperature: current(STOVE_TEMPERATURE),
            room_temperature: current(ROOM_TEMPERATURE),
            oxygen_level: current(OXYGEN_LEVEL),
            burn_level,
            phase,
            phase_text: phase.label(),
            burning: phase.is_active(),
            door,
            door_text: door.label(),
        }
    }
}
