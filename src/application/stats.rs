// Derived statistics over the most recent 24h window
use crate::domain::dashboard::DerivedStats;
use crate::domain::stove::is_open;
use crate::domain::telemetry::{Reading, Snapshot};
use std::time::Duration;

pub const WINDOW_MS: i64 = 24 * 60 * 60 * 1000;

/// Entity ids the statistics are computed from
#[derive(Debug, Clone, Default)]
pub struct StatsSensors {
    pub stove_temperature: String,
    pub room_temperature: String,
    pub door: Option<String>,
    pub oxygen: Option<String>,
    pub efficiency: Option<String>,
    pub active_time: Option<String>,
}

/// Inclusive `[start, end]` bounds in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Window {
    /// Anchored on the latest reading, not on wall-clock time
    pub fn ending_at_latest(readings: &[Reading]) -> Option<Self> {
        readings.last().map(|latest| Self {
            start_ms: latest.time_ms.saturating_sub(WINDOW_MS),
            end_ms: latest.time_ms,
        })
    }

    pub fn slice<'a>(&self, readings: &'a [Reading]) -> &'a [Reading] {
        let from = readings.partition_point(|r| r.time_ms < self.start_ms);
        let to = readings.partition_point(|r| r.time_ms <= self.end_ms);
        &readings[from..to.max(from)]
    }
}

/// Full recomputation from one snapshot. Total: empty or all-absent input
/// gives absent fields, never an error.
pub fn derive_stats(snapshot: &Snapshot, sensors: &StatsSensors, upstream_fallback: bool) -> DerivedStats {
    let stove = snapshot.history(&sensors.stove_temperature);
    let anchor = Window::ending_at_latest(stove);

    let stove_window = windowed(snapshot, anchor, &sensors.stove_temperature);
    let mut max_24h = fold_values(stove_window, f64::max);
    let mut min_24h = fold_values(stove_window, f64::min);
    let mut avg_room_temp = mean(windowed(snapshot, anchor, &sensors.room_temperature));

    if upstream_fallback {
        if let Some(summary) = snapshot.summary(&sensors.stove_temperature) {
            max_24h = max_24h.or(summary.max);
            min_24h = min_24h.or(summary.min);
        }
        if let Some(summary) = snapshot.summary(&sensors.room_temperature) {
            avg_room_temp = avg_room_temp.or(summary.average);
        }
    }

    DerivedStats {
        efficiency_percent: sensors
            .efficiency
            .as_deref()
            .and_then(|id| snapshot.current_value(id)),
        active_duration: sensors
            .active_time
            .as_deref()
            .and_then(|id| snapshot.current_value(id))
            .and_then(minutes_to_duration),
        door_open_count: sensors.door.as_deref().and_then(|id| count_openings(windowed(snapshot, anchor, id))),
        max_24h,
        min_24h,
        avg_room_temp,
        avg_oxygen_percent: sensors.oxygen.as_deref().and_then(|id| mean(windowed(snapshot, anchor, id))),
    }
}

/// Other sensors share the stove window; they only anchor on their own
/// history when the stove has none.
fn windowed<'a>(snapshot: &'a Snapshot, anchor: Option<Window>, id: &str) -> &'a [Reading] {
    let history = snapshot.history(id);
    match anchor.or_else(|| Window::ending_at_latest(history)) {
        Some(window) => window.slice(history),
        None => &[],
    }
}

fn fold_values(readings: &[Reading], f: fn(f64, f64) -> f64) -> Option<f64> {
    readings.iter().filter_map(|r| r.value).reduce(f)
}

fn mean(readings: &[Reading]) -> Option<f64> {
    let (sum, count) = readings
        .iter()
        .filter_map(|r| r.value)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Rising edges closed→open. The door is assumed closed before the first
/// sample, so a window that opens on an open door counts that period once.
pub fn count_openings(readings: &[Reading]) -> Option<u32> {
    let mut observed = false;
    let mut was_open = false;
    let mut openings = 0;

    for value in readings.iter().filter_map(|r| r.value) {
        observed = true;
        let open = is_open(value);
        if open && !was_open {
            openings += 1;
        }
        was_open = open;
    }

    observed.then_some(openings)
}

fn minutes_to_duration(minutes: f64) -> Option<Duration> {
    if minutes < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(minutes * 60.0).ok()
}
