//! Common error types used across the workspace.
//!
//! Each failure mode gets its own small typed error; [`ClapSenseError`] is
//! the workspace-wide enum that layers convert into via `#[from]`. Nothing
//! here is fatal — every failure is an ordinary `Err` the caller logs and
//! moves past.

use crate::id::DeviceId;
use crate::value::PropertyType;

/// A device id was added twice to the same adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {id} already exists")]
pub struct DuplicateDeviceError {
    pub id: DeviceId,
}

/// A device id was not present in the adapter's registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("device {id} not found")]
pub struct DeviceNotFoundError {
    pub id: DeviceId,
}

/// A value did not match (and could not be coerced to) a property's declared
/// type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {expected} property: got {got}")]
pub struct InvalidValueError {
    pub expected: PropertyType,
    pub got: &'static str,
}

/// A description violated a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Device descriptions must carry a non-empty display name.
    #[error("device name must not be empty")]
    EmptyName,

    /// The key in a description's property map must match the entry's own
    /// `name` field.
    #[error("property map key {key} does not match entry name {name}")]
    PropertyNameMismatch { key: String, name: String },
}

/// Top-level error for the clapsense workspace.
#[derive(Debug, thiserror::Error)]
pub enum ClapSenseError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateDeviceError),

    #[error(transparent)]
    NotFound(#[from] DeviceNotFoundError),

    #[error(transparent)]
    InvalidValue(#[from] InvalidValueError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
