//! Declarative device and property descriptions.
//!
//! A description is the input to device construction: the host (or the
//! loader) hands the adapter a [`DeviceDescription`] and the adapter
//! materialises one property per entry. Descriptions are plain serde data in
//! the host's wire shape:
//!
//! ```json
//! {
//!   "name": "Clap Sensor",
//!   "type": "binarySensor",
//!   "properties": {
//!     "on": { "name": "on", "type": "boolean", "value": false }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ClapSenseError, ValidationError};
use crate::id::PropertyName;
use crate::value::{PropertyType, PropertyValue};

/// Declarative description of a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescription {
    pub name: PropertyName,
    #[serde(rename = "type")]
    pub type_tag: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value: PropertyValue,
}

impl PropertyDescription {
    /// Shorthand for a boolean property with an initial value.
    #[must_use]
    pub fn boolean(name: impl Into<PropertyName>, initial: bool) -> Self {
        Self {
            name: name.into(),
            type_tag: PropertyType::Boolean,
            unit: None,
            description: None,
            value: PropertyValue::Bool(initial),
        }
    }

    /// Attach a unit label.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Attach a free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Declarative description of a device and its property set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<PropertyName, PropertyDescription>,
}

impl DeviceDescription {
    /// Create a builder for constructing a [`DeviceDescription`].
    #[must_use]
    pub fn builder() -> DeviceDescriptionBuilder {
        DeviceDescriptionBuilder::default()
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::Validation`] when `name` is empty or a
    /// property-map key disagrees with its entry's `name` field.
    pub fn validate(&self) -> Result<(), ClapSenseError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        for (key, property) in &self.properties {
            if key != &property.name {
                return Err(ValidationError::PropertyNameMismatch {
                    key: key.to_string(),
                    name: property.name.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Step-by-step builder for [`DeviceDescription`].
#[derive(Debug, Default)]
pub struct DeviceDescriptionBuilder {
    name: Option<String>,
    type_tag: Option<String>,
    description: Option<String>,
    properties: BTreeMap<PropertyName, PropertyDescription>,
}

impl DeviceDescriptionBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn type_tag(mut self, type_tag: impl Into<String>) -> Self {
        self.type_tag = Some(type_tag.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Register a property, keyed by its own name.
    #[must_use]
    pub fn property(mut self, property: PropertyDescription) -> Self {
        self.properties.insert(property.name.clone(), property);
        self
    }

    /// Consume the builder, validate, and return a [`DeviceDescription`].
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<DeviceDescription, ClapSenseError> {
        let description = DeviceDescription {
            name: self.name.unwrap_or_default(),
            type_tag: self.type_tag.unwrap_or_default(),
            description: self.description,
            properties: self.properties,
        };
        description.validate()?;
        Ok(description)
    }
}
