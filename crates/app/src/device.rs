//! `ClapSensor` — a virtual sensor device built from a declarative
//! description.

use std::collections::BTreeMap;
use std::sync::Arc;

use clapsense_domain::description::DeviceDescription;
use clapsense_domain::error::ClapSenseError;
use clapsense_domain::id::{DeviceId, PropertyName};
use clapsense_domain::snapshot::DeviceSnapshot;

use crate::ports::{ClapSource, DeviceHost};
use crate::property::{PropertyLink, ToggleProperty};

/// One virtual clap sensor: identity plus a set of toggle properties.
///
/// All behaviour lives in the properties; construction is the device's only
/// job — materialise one [`ToggleProperty`] per description entry, each with
/// its own clap subscription.
pub struct ClapSensor {
    id: DeviceId,
    name: String,
    type_tag: String,
    description: Option<String>,
    properties: BTreeMap<PropertyName, ToggleProperty>,
}

impl ClapSensor {
    /// Build a device from its description.
    ///
    /// Each property immediately notifies the host with its initial value
    /// (see [`ToggleProperty::spawn`]).
    ///
    /// # Errors
    ///
    /// Returns [`ClapSenseError::Validation`] when the description is
    /// malformed, or [`ClapSenseError::InvalidValue`] when a property's
    /// initial value does not match its declared type.
    pub fn new(
        id: DeviceId,
        description: &DeviceDescription,
        host: &Arc<dyn DeviceHost>,
        source: &dyn ClapSource,
    ) -> Result<Self, ClapSenseError> {
        description.validate()?;

        let mut properties = BTreeMap::new();
        for (name, property_description) in &description.properties {
            let link = PropertyLink::new(id.clone(), Arc::clone(host));
            let property = ToggleProperty::spawn(property_description, link, source.subscribe())?;
            properties.insert(name.clone(), property);
        }

        Ok(Self {
            id,
            name: description.name.clone(),
            type_tag: description.type_tag.clone(),
            description: description.description.clone(),
            properties,
        })
    }

    /// The device's id, unique within its adapter.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// The device's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The device's type tag (e.g. `binarySensor`).
    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &PropertyName) -> Option<&ToggleProperty> {
        self.properties.get(name)
    }

    /// Names of all properties on this device.
    pub fn property_names(&self) -> impl Iterator<Item = &PropertyName> {
        self.properties.keys()
    }

    /// Serialize the device's current state for the host.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        DeviceSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            type_tag: self.type_tag.clone(),
            description: self.description.clone(),
            properties: self
                .properties
                .iter()
                .map(|(name, property)| (name.clone(), property.snapshot()))
                .collect(),
        }
    }
}
