// Host-side raw state payload, as delivered on each dashboard refresh
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntityState {
    #[serde(default)]
    pub state: Value,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl RawEntityState {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Entries of the `history` attribute, or nothing when it is missing or not a list
    pub fn history(&self) -> &[Value] {
        self.attributes
            .get("history")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawSnapshot {
    pub states: BTreeMap<String, RawEntityState>,
}

impl RawSnapshot {
    /// Only the envelope is checked here. Entries that do not look like entity
    /// states are dropped and later read as unavailable.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let root = match value {
            Value::Object(root) => root,
            Value::Null => return Err("snapshot is null".to_string()),
            other => return Err(format!("snapshot must be an object, got {}", kind(other))),
        };

        let states = match root.get("states") {
            Some(Value::Object(states)) => states,
            Some(other) => return Err(format!("'states' must be an object, got {}", kind(other))),
            None => return Err("snapshot has no 'states'".to_string()),
        };

        let mut parsed = BTreeMap::new();
        for (entity_id, entry) in states {
            match RawEntityState::deserialize(entry) {
                Ok(state) => {
                    parsed.insert(entity_id.clone(), state);
                }
                Err(e) => {
                    tracing::debug!("Dropping malformed state for {}: {}", entity_id, e);
                }
            }
        }

        Ok(Self { states: parsed })
    }

    pub fn get(&self, entity_id: &str) -> Option<&RawEntityState> {
        self.states.get(entity_id)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
