use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const STOVE_TEMPERATURE: &str = "stove_temperature";
pub const ROOM_TEMPERATURE: &str = "room_temperature";
pub const DOOR_SENSOR: &str = "door_sensor";
pub const OXYGEN_LEVEL: &str = "oxygen_level";
pub const BURN_LEVEL: &str = "burn_level";
pub const PHASE: &str = "phase";
pub const EFFICIENCY: &str = "efficiency";
pub const ACTIVE_TIME: &str = "active_time";

const REQUIRED_BINDINGS: [&str; 2] = [STOVE_TEMPERATURE, ROOM_TEMPERATURE];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("You need to define {0}")]
    MissingBinding(&'static str),
    #[error("series references unbound sensor '{0}'")]
    UnknownSeriesBinding(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardConfig {
    /// Logical name (e.g. `stove_temperature`) → host entity id
    pub sensor_bindings: BTreeMap<String, String>,
    #[serde(default = "default_series")]
    pub series: Vec<SeriesConfig>,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    pub stove_api: Option<StoveApiSettings>,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub binding: String,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChartConfig {
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StatsConfig {
    /// Use the upstream min/max/average attributes when the window has no data
    #[serde(default)]
    pub upstream_fallback: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoveApiSettings {
    pub host: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

fn default_series() -> Vec<SeriesConfig> {
    vec![
        SeriesConfig {
            binding: STOVE_TEMPERATURE.to_string(),
            name: "Stove temperature".to_string(),
            color: Some("#f97316".to_string()),
        },
        SeriesConfig {
            binding: ROOM_TEMPERATURE.to_string(),
            name: "Room temperature".to_string(),
            color: Some("#3b82f6".to_string()),
        },
    ]
}

fn default_request_timeout() -> u64 {
    10
}

impl CardConfig {
    pub fn with_bindings(sensor_bindings: BTreeMap<String, String>) -> Self {
        Self {
            sensor_bindings,
            series: default_series(),
            chart: ChartConfig::default(),
            stats: StatsConfig::default(),
            stove_api: None,
            server: ServerSettings::default(),
        }
    }

    pub fn binding(&self, logical_name: &str) -> Option<&str> {
        self.sensor_bindings
            .get(logical_name)
            .map(String::as_str)
            .filter(|id| !id.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for required in REQUIRED_BINDINGS {
            if self.binding(required).is_none() {
                return Err(ConfigError::MissingBinding(required));
            }
        }
        for series in &self.series {
            if self.binding(&series.binding).is_none() {
                return Err(ConfigError::UnknownSeriesBinding(series.binding.clone()));
            }
        }
        Ok(())
    }
}

pub fn load_card_config() -> anyhow::Result<CardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/card"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> CardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_track_stove_and_room() {
        let config = parse(
            r#"
            [sensor_bindings]
            stove_temperature = "sensor.stove"
            room_temperature = "sensor.room"
            "#,
        );

        assert!(config.validate().is_ok());
        let bindings: Vec<_> = config.series.iter().map(|s| s.binding.as_str()).collect();
        assert_eq!(bindings, vec![STOVE_TEMPERATURE, ROOM_TEMPERATURE]);
        assert!(!config.stats.upstream_fallback);
        assert!(config.stove_api.is_none());
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_missing_required_binding() {
        let config = parse(
            r#"
            [sensor_bindings]
            room_temperature = "sensor.room"
            "#,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingBinding(STOVE_TEMPERATURE))
        );
    }

    #[test]
    fn test_blank_binding_counts_as_missing() {
        let config = parse(
            r#"
            [sensor_bindings]
            stove_temperature = "sensor.stove"
            room_temperature = "  "
            "#,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingBinding(ROOM_TEMPERATURE))
        );
    }

    #[test]
    fn test_series_must_reference_bound_sensor() {
        let config = parse(
            r#"
            [sensor_bindings]
            stove_temperature = "sensor.stove"
            room_temperature = "sensor.room"

            [[series]]
            binding = "oxygen_level"
            name = "Oxygen"
            "#,
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownSeriesBinding(OXYGEN_LEVEL.to_string()))
        );
    }

    #[test]
    fn test_stove_api_timeout_default() {
        let config = parse(
            r#"
            [sensor_bindings]
            stove_temperature = "sensor.stove"
            room_temperature = "sensor.room"

            [stove_api]
            host = "192.168.1.40"
            "#,
        );
        let api = config.stove_api.unwrap();
        assert_eq!(api.host, "192.168.1.40");
        assert_eq!(api.request_timeout_secs, 10);
    }
}
