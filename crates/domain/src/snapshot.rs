//! Serialized device and property state, as reported to the host.
//!
//! Snapshots are the payloads of host notifications: the full device shape on
//! `device_added`, a single property on `property_changed`. They carry the
//! current cached value, unlike descriptions which carry the initial one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, PropertyName};
use crate::value::{PropertyType, PropertyValue};

/// Current state of a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub name: PropertyName,
    #[serde(rename = "type")]
    pub type_tag: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: PropertyValue,
}

/// Current state of a device and all of its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: BTreeMap<PropertyName, PropertySnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_through_serde_json() {
        let snapshot = DeviceSnapshot {
            id: DeviceId::from("clap-sensor-0"),
            name: "Clap Sensor".to_string(),
            type_tag: "binarySensor".to_string(),
            description: None,
            properties: BTreeMap::from([(
                PropertyName::from("on"),
                PropertySnapshot {
                    name: PropertyName::from("on"),
                    type_tag: PropertyType::Boolean,
                    unit: None,
                    description: None,
                    value: PropertyValue::Bool(true),
                },
            )]),
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: DeviceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn should_serialize_type_tag_under_wire_name() {
        let snapshot = PropertySnapshot {
            name: PropertyName::from("on"),
            type_tag: PropertyType::Boolean,
            unit: None,
            description: None,
            value: PropertyValue::Bool(false),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["type"], "boolean");
        assert_eq!(json["value"], false);
    }
}
