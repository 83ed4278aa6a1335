// Snapshot adapter - Normalizes raw host state into per-sensor readings
use crate::domain::telemetry::{Reading, SensorSummary, Snapshot};
use crate::infrastructure::raw_state::{RawEntityState, RawSnapshot};
use serde_json::Value;

const UNAVAILABLE_STATES: [&str; 3] = ["unavailable", "unknown", ""];

/// Build a `Snapshot` for the given sensors. Never fails: anything missing or
/// unparseable becomes an absent value or an empty history.
pub fn normalize<'a, I>(raw: &RawSnapshot, sensors: I) -> Snapshot
where
    I: IntoIterator<Item = &'a str>,
{
    let mut snapshot = Snapshot::default();

    for sensor_id in sensors {
        let (current, readings, summary) = match raw.get(sensor_id) {
            Some(entity) if !is_unavailable(entity) => (
                parse_value(&entity.state),
                parse_history(sensor_id, entity),
                parse_summary(entity),
            ),
            Some(_) => {
                tracing::debug!("Sensor {} is unavailable", sensor_id);
                (None, Vec::new(), SensorSummary::default())
            }
            None => {
                tracing::debug!("Sensor {} missing from snapshot", sensor_id);
                (None, Vec::new(), SensorSummary::default())
            }
        };

        snapshot.sensor_values.insert(sensor_id.to_string(), current);
        snapshot.sensor_histories.insert(sensor_id.to_string(), readings);
        snapshot.sensor_summaries.insert(sensor_id.to_string(), summary);
    }

    snapshot
}

fn is_unavailable(entity: &RawEntityState) -> bool {
    match &entity.state {
        Value::Null => true,
        Value::String(s) => UNAVAILABLE_STATES.contains(&s.trim().to_ascii_lowercase().as_str()),
        _ => false,
    }
}

/// Numbers, numeric strings and binary states. Everything else is absent.
pub fn parse_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let s = s.trim();
            match s.to_ascii_lowercase().as_str() {
                "on" | "open" | "true" => Some(1.0),
                "off" | "closed" | "false" => Some(0.0),
                _ => s.parse::<f64>().ok(),
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// RFC 3339 strings or epoch milliseconds. Times chrono cannot represent are rejected.
pub fn parse_time_ms(value: &Value) -> Option<i64> {
    let time_ms = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|time| time.timestamp_millis()),
        _ => None,
    }?;
    chrono::DateTime::from_timestamp_millis(time_ms).map(|_| time_ms)
}

fn parse_history(sensor_id: &str, entity: &RawEntityState) -> Vec<Reading> {
    let mut readings: Vec<Reading> = Vec::with_capacity(entity.history().len());
    let mut dropped = 0usize;

    for entry in entity.history() {
        let time = entry.get("time").and_then(parse_time_ms);
        match time {
            Some(time_ms) => {
                let value = entry.get("value").and_then(parse_value);
                readings.push(Reading::new(time_ms, value));
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(
            "Dropped {} history entries without a usable time for {}",
            dropped,
            sensor_id
        );
    }

    // Stable, so samples sharing a timestamp keep their delivery order
    readings.sort_by_key(|r| r.time_ms);
    readings
}

fn parse_summary(entity: &RawEntityState) -> SensorSummary {
    let first_of = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| entity.attribute(name).and_then(parse_value))
    };

    SensorSummary {
        min: first_of(&["min_24h", "min"]),
        max: first_of(&["max_24h", "max"]),
        average: first_of(&["average", "mean"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawSnapshot {
        RawSnapshot::from_value(&value).unwrap()
    }

    #[test]
    fn test_missing_and_unavailable_sensors_degrade() {
        let raw = raw(json!({
            "states": {
                "sensor.stove": {"state": "unavailable", "attributes": {
                    "history": [{"time": 1000, "value": 200}]
                }},
            }
        }));

        let snapshot = normalize(&raw, ["sensor.stove", "sensor.room"]);

        assert_eq!(snapshot.current_value("sensor.stove"), None);
        assert!(snapshot.history("sensor.stove").is_empty());
        assert_eq!(snapshot.current_value("sensor.room"), None);
        assert!(snapshot.history("sensor.room").is_empty());
        assert!(snapshot.sensor_values.contains_key("sensor.room"));
    }

    #[test]
    fn test_history_is_sorted_and_unparseable_values_are_absent() {
        let raw = raw(json!({
            "states": {
                "sensor.stove": {"state": "245.5", "attributes": {
                    "history": [
                        {"time": "2024-01-01T02:00:00Z", "value": "garbage"},
                        {"time": "2024-01-01T00:00:00Z", "value": "180"},
                        {"time": "2024-01-01T01:00:00Z", "value": 320},
                        {"time": "not a time", "value": 1},
                        {"time": "2024-01-01T03:00:00Z", "value": null},
                    ]
                }},
            }
        }));

        let snapshot = normalize(&raw, ["sensor.stove"]);
        let history = snapshot.history("sensor.stove");

        assert_eq!(snapshot.current_value("sensor.stove"), Some(245.5));
        assert_eq!(history.len(), 4);
        assert!(history.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
        assert_eq!(history[0].value, Some(180.0));
        assert_eq!(history[1].value, Some(320.0));
        assert_eq!(history[2].value, None);
        assert_eq!(history[3].value, None);
    }

    #[test]
    fn test_parse_value_rules() {
        assert_eq!(parse_value(&json!("21.5")), Some(21.5));
        assert_eq!(parse_value(&json!(" 7 ")), Some(7.0));
        assert_eq!(parse_value(&json!("on")), Some(1.0));
        assert_eq!(parse_value(&json!("off")), Some(0.0));
        assert_eq!(parse_value(&json!(true)), Some(1.0));
        assert_eq!(parse_value(&json!("NaN")), None);
        assert_eq!(parse_value(&json!("inf")), None);
        assert_eq!(parse_value(&json!({"v": 1})), None);
        assert_eq!(parse_value(&Value::Null), None);
    }

    #[test]
    fn test_parse_time_accepts_rfc3339_and_millis() {
        assert_eq!(parse_time_ms(&json!(1_700_000_000_000i64)), Some(1_700_000_000_000));
        assert_eq!(parse_time_ms(&json!("1970-01-01T00:00:01Z")), Some(1000));
        assert_eq!(parse_time_ms(&json!("1970-01-01T01:00:01+01:00")), Some(1000));
        assert_eq!(parse_time_ms(&json!("yesterday")), None);
    }

    #[test]
    fn test_out_of_range_times_are_dropped() {
        assert_eq!(parse_time_ms(&json!(-1e30)), None);
        assert_eq!(parse_time_ms(&json!(i64::MIN)), None);
        assert_eq!(parse_time_ms(&json!(1.7e12)), Some(1_700_000_000_000));

        let raw = raw(json!({
            "states": {
                "sensor.stove": {"state": "250", "attributes": {
                    "history": [
                        {"time": -1e30, "value": 100},
                        {"time": 1.7e12, "value": 250},
                    ]
                }},
            }
        }));

        let snapshot = normalize(&raw, ["sensor.stove"]);
        assert_eq!(
            snapshot.history("sensor.stove"),
            &[Reading::new(1_700_000_000_000, Some(250.0))]
        );
    }

    #[test]
    fn test_summary_attributes() {
        let raw = raw(json!({
            "states": {
                "sensor.stove": {"state": "250", "attributes": {
                    "min_24h": "180", "max": 320, "average": "unknown"
                }},
            }
        }));

        let snapshot = normalize(&raw, ["sensor.stove"]);
        let summary = snapshot.summary("sensor.stove").unwrap();
        assert_eq!(summary.min, Some(180.0));
        assert_eq!(summary.max, Some(320.0));
        assert_eq!(summary.average, None);
    }
}
