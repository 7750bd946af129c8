//! Typed property values with validation and coercion.
//!
//! A property declares its type once, at construction, and every write is
//! checked against that declaration. Coercion means the stored value is not
//! guaranteed to equal the requested one — callers must read the result of a
//! write rather than assume an echo.

use serde::{Deserialize, Serialize};

use crate::error::InvalidValueError;

/// Declared type of a property, as it appears in a description
/// (`"type": "boolean"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
}

impl PropertyType {
    /// Validate `value` against this declared type, coercing where a lossless
    /// conversion exists.
    ///
    /// Booleans accept `Bool` as-is and the integers `0`/`1` (coerced to
    /// `false`/`true`). Everything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidValueError`] when `value` cannot represent this type.
    pub fn coerce(self, value: PropertyValue) -> Result<PropertyValue, InvalidValueError> {
        match (self, value) {
            (Self::Boolean, v @ PropertyValue::Bool(_)) => Ok(v),
            (Self::Boolean, PropertyValue::Int(0)) => Ok(PropertyValue::Bool(false)),
            (Self::Boolean, PropertyValue::Int(1)) => Ok(PropertyValue::Bool(true)),
            (Self::Boolean, other) => Err(InvalidValueError {
                expected: self,
                got: other.kind(),
            }),
        }
    }

    /// The wire name of this type (`boolean`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value as received from or reported to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PropertyValue {
    /// The kind of this value, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
        }
    }

    /// The inner boolean, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Flip a boolean value in place. Non-boolean values are left untouched
    /// (a toggling property is always declared boolean, so its stored value
    /// has already passed coercion).
    pub fn toggle(&mut self) {
        if let Self::Bool(b) = self {
            *b = !*b;
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_bool_for_boolean_type() {
        let coerced = PropertyType::Boolean.coerce(PropertyValue::Bool(true)).unwrap();
        assert_eq!(coerced, PropertyValue::Bool(true));
    }

    #[test]
    fn should_coerce_zero_and_one_to_bool() {
        assert_eq!(
            PropertyType::Boolean.coerce(PropertyValue::Int(0)).unwrap(),
            PropertyValue::Bool(false)
        );
        assert_eq!(
            PropertyType::Boolean.coerce(PropertyValue::Int(1)).unwrap(),
            PropertyValue::Bool(true)
        );
    }

    #[test]
    fn should_reject_other_integers_for_boolean_type() {
        let err = PropertyType::Boolean
            .coerce(PropertyValue::Int(2))
            .unwrap_err();
        assert_eq!(err.expected, PropertyType::Boolean);
        assert_eq!(err.got, "integer");
    }

    #[test]
    fn should_reject_string_for_boolean_type() {
        let result = PropertyType::Boolean.coerce(PropertyValue::Str("on".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn should_toggle_bool_in_place() {
        let mut value = PropertyValue::Bool(false);
        value.toggle();
        assert_eq!(value, PropertyValue::Bool(true));
        value.toggle();
        assert_eq!(value, PropertyValue::Bool(false));
    }

    #[test]
    fn should_leave_non_bool_untouched_on_toggle() {
        let mut value = PropertyValue::Int(3);
        value.toggle();
        assert_eq!(value, PropertyValue::Int(3));
    }

    #[test]
    fn should_serialize_bool_without_tag() {
        let json = serde_json::to_string(&PropertyValue::Bool(false)).unwrap();
        assert_eq!(json, "false");
        let parsed: PropertyValue = serde_json::from_str("true").unwrap();
        assert_eq!(parsed, PropertyValue::Bool(true));
    }

    #[test]
    fn should_serialize_type_as_lowercase() {
        let json = serde_json::to_string(&PropertyType::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");
    }
}
