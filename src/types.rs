//! Core data types for the CYD panel
//!
//! This module contains the plain data structures shared by the core
//! modules, the host backend and the frontend.
//!
//! # Main Types
//!
//! - [`ConfigValue`] - A single scalar in the flat options bag
//! - [`SensorState`] - One entry of the host's live sensor snapshot
//! - [`SensorSnapshot`] - All sensor states keyed by entity id
//! - [`EntityDescriptor`] - A selectable entity as shown in a picker

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sensor state sentinels that never carry a usable value
pub const UNUSABLE_STATES: [&str; 2] = ["unavailable", "unknown"];

/// A value stored under one key of the options bag
///
/// Serialized untagged, so the bag round-trips as plain JSON scalars.
/// Anything that is not a bool, number or string is kept verbatim in
/// [`ConfigValue::Other`] so saving never drops foreign keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Interpret the value as a number the way a form field would:
    /// numbers pass through, text is trimmed and parsed.
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            ConfigValue::Number(v) => Some(*v),
            ConfigValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

/// Live state of a single sensor as reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorState {
    /// Raw state string (`"42.5"`, `"unavailable"`, ...)
    pub state: String,

    /// Human readable name, if the host knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    /// Unit of measurement attribute
    #[serde(
        default,
        rename = "unit_of_measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<String>,
}

impl SensorState {
    /// Create a state without attributes
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            friendly_name: None,
            unit: None,
        }
    }

    /// Attach a friendly name
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Attach a unit of measurement
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Whether the state is one of the "no value" sentinels
    pub fn is_unusable(&self) -> bool {
        UNUSABLE_STATES.contains(&self.state.as_str())
    }
}

/// Snapshot of every sensor state the host exposes, keyed by entity id
pub type SensorSnapshot = HashMap<String, SensorState>;

/// A selectable entity as listed by a picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Entity id, e.g. `sensor.solar_power`
    pub id: String,
    /// `"{friendly_name} ({id})"`, or the bare id without a friendly name
    pub display_name: String,
}

impl EntityDescriptor {
    /// Display name without the trailing `" (id)"` suffix
    pub fn short_name(&self) -> &str {
        let suffix = format!(" ({})", self.id);
        self.display_name
            .strip_suffix(suffix.as_str())
            .unwrap_or(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_untagged_roundtrip() {
        let json = r#"{"a": true, "b": 5, "c": "sensor.x", "d": [1, 2]}"#;
        let parsed: std::collections::BTreeMap<String, ConfigValue> =
            serde_json::from_str(json).unwrap();

        assert_eq!(parsed["a"], ConfigValue::Bool(true));
        assert_eq!(parsed["b"], ConfigValue::Number(5.0));
        assert_eq!(parsed["c"], ConfigValue::Text("sensor.x".to_string()));
        assert!(matches!(parsed["d"], ConfigValue::Other(_)));

        let back = serde_json::to_string(&parsed).unwrap();
        assert_eq!(back, r#"{"a":true,"b":5.0,"c":"sensor.x","d":[1,2]}"#);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(ConfigValue::Number(7.0).coerce_number(), Some(7.0));
        assert_eq!(ConfigValue::from(" 12 ").coerce_number(), Some(12.0));
        assert_eq!(ConfigValue::from("").coerce_number(), None);
        assert_eq!(ConfigValue::from("abc").coerce_number(), None);
        assert_eq!(ConfigValue::Bool(true).coerce_number(), None);
    }

    #[test]
    fn test_sensor_state_json_names() {
        let json = r#"{"state": "21.5", "friendly_name": "Room", "unit_of_measurement": "°C"}"#;
        let state: SensorState = serde_json::from_str(json).unwrap();
        assert_eq!(state.friendly_name.as_deref(), Some("Room"));
        assert_eq!(state.unit.as_deref(), Some("°C"));
        assert!(!state.is_unusable());
        assert!(SensorState::new("unknown").is_unusable());
    }

    #[test]
    fn test_short_name() {
        let named = EntityDescriptor {
            id: "sensor.pv".to_string(),
            display_name: "PV Power (sensor.pv)".to_string(),
        };
        assert_eq!(named.short_name(), "PV Power");

        let bare = EntityDescriptor {
            id: "sensor.pv".to_string(),
            display_name: "sensor.pv".to_string(),
        };
        assert_eq!(bare.short_name(), "sensor.pv");
    }
}
