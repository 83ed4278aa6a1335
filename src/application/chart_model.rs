// Chart model - Retained series and axis state for one attached component
use crate::application::chart_surface::SurfaceLease;
use crate::domain::dashboard::{AxisCache, DerivedStats};
use crate::domain::telemetry::{Series, Snapshot};
use crate::infrastructure::config::ChartConfig;

const MAX_X_LABELS: usize = 5;

/// A tracked sensor resolved to its entity id
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedSeries {
    pub sensor_id: String,
    pub label: String,
    pub color: Option<String>,
}

#[derive(Debug)]
pub struct ChartModel {
    pub series: Vec<Series>,
    pub axis: AxisCache,
    pub stats: DerivedStats,
    /// `None` until the first snapshot arrives
    pub snapshot: Option<Snapshot>,
    surface: SurfaceLease,
}

impl ChartModel {
    pub fn new(tracked: &[TrackedSeries], surface: SurfaceLease) -> Self {
        let series = tracked
            .iter()
            .map(|t| Series::new(t.sensor_id.clone(), t.label.clone(), t.color.clone(), Vec::new()))
            .collect();

        Self {
            series,
            axis: AxisCache::default(),
            stats: DerivedStats::default(),
            snapshot: None,
            surface,
        }
    }

    /// Replace every series wholesale. Nothing from the previous snapshot survives.
    pub fn replace(&mut self, tracked: &[TrackedSeries], snapshot: Snapshot, stats: DerivedStats, chart: &ChartConfig) {
        self.series = tracked
            .iter()
            .map(|t| {
                Series::new(
                    t.sensor_id.clone(),
                    t.label.clone(),
                    t.color.clone(),
                    snapshot.history(&t.sensor_id).to_vec(),
                )
            })
            .collect();
        self.axis = build_axis(&self.series, chart);
        self.stats = stats;
        self.snapshot = Some(snapshot);

        tracing::trace!(
            "Chart on surface {:?} now holds {} series",
            self.surface.handle(),
            self.series.len()
        );
    }
}

pub fn build_axis(series: &[Series], chart: &ChartConfig) -> AxisCache {
    let mut x_min: Option<i64> = None;
    let mut x_max: Option<i64> = None;
    let mut y_min: Option<f64> = None;
    let mut y_max: Option<f64> = None;

    for (time_ms, value) in series.iter().flat_map(Series::plottable) {
        x_min = Some(x_min.map_or(time_ms, |m| m.min(time_ms)));
        x_max = Some(x_max.map_or(time_ms, |m| m.max(time_ms)));
        y_min = Some(y_min.map_or(value, |m| m.min(value)));
        y_max = Some(y_max.map_or(value, |m| m.max(value)));
    }

    let x_labels = match (x_min, x_max) {
        (Some(start), Some(end)) => tick_labels(start, end),
        _ => Vec::new(),
    };

    AxisCache {
        x_min_ms: x_min,
        x_max_ms: x_max,
        y_min: chart.y_min.or(y_min),
        y_max: chart.y_max.or(y_max),
        x_labels,
    }
}

fn tick_labels(start_ms: i64, end_ms: i64) -> Vec<String> {
    let ticks = if end_ms > start_ms { MAX_X_LABELS } else { 1 };
    let step = if ticks > 1 {
        end_ms.saturating_sub(start_ms) / (ticks as i64 - 1)
    } else {
        0
    };

    (0..ticks)
        .filter_map(|i| {
            let at = if i + 1 == ticks {
                end_ms
            } else {
                start_ms.saturating_add(step.saturating_mul(i as i64))
            };
            chrono::DateTime::from_timestamp_millis(at).map(|t| t.format("%H:%M").to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::Reading;

    // 2024-01-01T12:00:00Z
    const NOON: i64 = 1_704_110_400_000;
    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn series(readings: Vec<Reading>) -> Series {
        Series::new("sensor.stove".to_string(), "Stove".to_string(), None, readings)
    }

    #[test]
    fn test_axis_ignores_absent_values() {
        let axis = build_axis(
            &[series(vec![
                Reading::new(NOON, Some(245.0)),
                Reading::new(NOON + HOUR_MS, None),
                Reading::new(NOON + 2 * HOUR_MS, Some(238.0)),
            ])],
            &ChartConfig::default(),
        );

        assert_eq!(axis.x_min_ms, Some(NOON));
        assert_eq!(axis.x_max_ms, Some(NOON + 2 * HOUR_MS));
        assert_eq!(axis.y_min, Some(238.0));
        assert_eq!(axis.y_max, Some(245.0));
        assert_eq!(axis.x_labels, vec!["12:00", "12:30", "13:00", "13:30", "14:00"]);
    }

    #[test]
    fn test_axis_overrides_and_empty_series() {
        let chart = ChartConfig {
            y_min: Some(0.0),
            y_max: None,
        };
        let axis = build_axis(&[series(Vec::new())], &chart);

        assert_eq!(axis.x_min_ms, None);
        assert_eq!(axis.y_min, Some(0.0));
        assert_eq!(axis.y_max, None);
        assert!(axis.x_labels.is_empty());
    }

    #[test]
    fn test_axis_spanning_full_time_range_does_not_overflow() {
        let axis = build_axis(
            &[series(vec![
                Reading::new(i64::MIN, Some(1.0)),
                Reading::new(NOON, Some(2.0)),
            ])],
            &ChartConfig::default(),
        );

        assert_eq!(axis.x_min_ms, Some(i64::MIN));
        assert_eq!(axis.x_max_ms, Some(NOON));
        assert_eq!(axis.x_labels.last().map(String::as_str), Some("12:00"));
    }

    #[test]
    fn test_single_point_has_one_label() {
        let axis = build_axis(&[series(vec![Reading::new(NOON, Some(1.0))])], &ChartConfig::default());
        assert_eq!(axis.x_labels, vec!["12:00"]);
    }
}
