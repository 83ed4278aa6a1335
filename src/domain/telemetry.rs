// Telemetry data domain models
use serde::Serialize;
use std::collections::BTreeMap;

/// Opaque identifier of one external measurable quantity (an entity id on the host)
pub type SensorId = String;

/// One historical sample. `value` is `None` when the sample was unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub time_ms: i64,
    pub value: Option<f64>,
}

impl Reading {
    pub fn new(time_ms: i64, value: Option<f64>) -> Self {
        Self { time_ms, value }
    }
}

/// Scalar attributes the upstream sensor may already compute on its own
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub id: SensorId,
    pub label: String,
    pub color: Option<String>,
    pub readings: Vec<Reading>,
}

impl Series {
    pub fn new(id: SensorId, label: String, color: Option<String>, readings: Vec<Reading>) -> Self {
        Self {
            id,
            label,
            color,
            readings,
        }
    }

    /// Readings that can actually be drawn, as (time_ms, value) pairs
    pub fn plottable(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.readings
            .iter()
            .filter_map(|r| r.value.map(|v| (r.time_ms, v)))
    }
}

/// Normalized, internally consistent view of one host delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub sensor_values: BTreeMap<SensorId, Option<f64>>,
    pub sensor_histories: BTreeMap<SensorId, Vec<Reading>>,
    pub sensor_summaries: BTreeMap<SensorId, SensorSummary>,
}

impl Snapshot {
    pub fn current_value(&self, id: &str) -> Option<f64> {
        self.sensor_values.get(id).copied().flatten()
    }

    pub fn history(&self, id: &str) -> &[Reading] {
        self.sensor_histories
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn summary(&self, id: &str) -> Option<&SensorSummary> {
        self.sensor_summaries.get(id)
    }
}
