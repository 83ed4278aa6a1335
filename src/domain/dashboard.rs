// Dashboard domain model: what the rendering layer receives
use super::stove::{BurnLevel, DoorState, StovePhase};
use super::telemetry::Series;
use serde::Serialize;
use std::time::Duration;

/// Shown in place of any absent statistic
pub const PLACEHOLDER: &str = "—";

/// Summary metrics for the stats tiles. Every field is absent when its sensor is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedStats {
    pub efficiency_percent: Option<f64>,
    pub active_duration: Option<Duration>,
    pub door_open_count: Option<u32>,
    pub max_24h: Option<f64>,
    pub min_24h: Option<f64>,
    pub avg_room_temp: Option<f64>,
    pub avg_oxygen_percent: Option<f64>,
}

impl DerivedStats {
    pub fn is_empty(&self) -> bool {
        *self == DerivedStats::default()
    }

    /// Render-ready summary tiles, in display order
    pub fn tiles(&self) -> Vec<TileData> {
        vec![
            TileData::new("efficiency", "Efficiency", "%", self.efficiency_percent, 0),
            TileData::text(
                "active_time",
                "Active time",
                self.active_duration.map(format_active_duration),
            ),
            TileData::new(
                "door_openings",
                "Door openings",
                "",
                self.door_open_count.map(f64::from),
                0,
            ),
            TileData::new("max_24h", "Max temperature (24h)", "°C", self.max_24h, 0),
            TileData::new("min_24h", "Min temperature (24h)", "°C", self.min_24h, 0),
            TileData::new("avg_room", "Average room temperature", "°C", self.avg_room_temp, 1),
            TileData::new("avg_oxygen", "Average O₂", "%", self.avg_oxygen_percent, 0),
        ]
    }
}

/// "4h30" style, as shown on the stats card
pub fn format_active_duration(duration: Duration) -> String {
    let minutes = duration.as_secs() / 60;
    format!("{}h{:02}", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    pub precision: usize,
    pub display: String,
}

impl TileData {
    pub fn new(id: &str, title: &str, unit: &str, value: Option<f64>, precision: usize) -> Self {
        let display = match value {
            Some(v) => format!("{:.*}{}", precision, v, unit),
            None => PLACEHOLDER.to_string(),
        };
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.to_string(),
            value,
            precision,
            display,
        }
    }

    fn text(id: &str, title: &str, text: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: String::new(),
            value: None,
            precision: 0,
            display: text.unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

/// Axis ranges and tick labels derived from the current series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisCache {
    pub x_min_ms: Option<i64>,
    pub x_max_ms: Option<i64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub x_labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComponentState {
    Detached,
    AwaitingData,
    Rendering,
}

/// Copy-out presentation state handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub state: ComponentState,
    pub series: Vec<Series>,
    pub axis: AxisCache,
    pub stats: DerivedStats,
    pub tiles: Vec<TileData>,
}

/// The control card: live values plus the burn-level slider position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPanelView {
    pub stove_temperature: Option<f64>,
    pub room_temperature: Option<f64>,
    pub oxygen_level: Option<f64>,
    pub burn_level: Option<BurnLevel>,
    pub phase: StovePhase,
    pub phase_text: &'static str,
    pub burning: bool,
    pub door: DoorState,
    pub door_text: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_active_duration() {
        assert_eq!(format_active_duration(Duration::from_secs(270 * 60)), "4h30");
        assert_eq!(format_active_duration(Duration::from_secs(5 * 60)), "0h05");
    }

    #[test]
    fn test_absent_stats_render_placeholder() {
        let tiles = DerivedStats::default().tiles();
        assert!(tiles.iter().all(|t| t.display == PLACEHOLDER));
        assert!(tiles.iter().all(|t| t.value.is_none()));
    }

    #[test]
    fn test_tile_display_uses_precision() {
        let stats = DerivedStats {
            max_24h: Some(320.0),
            avg_room_temp: Some(21.26),
            door_open_count: Some(3),
            ..Default::default()
        };
        let tiles = stats.tiles();
        let by_id = |id: &str| tiles.iter().find(|t| t.id == id).unwrap().display.clone();

        assert_eq!(by_id("max_24h"), "320°C");
        assert_eq!(by_id("avg_room"), "21.3°C");
        assert_eq!(by_id("door_openings"), "3");
        assert_eq!(by_id("efficiency"), PLACEHOLDER);
    }
}
