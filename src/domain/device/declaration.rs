//! Device declarations as written in setup files.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::ParamValue;

/// Key holding the device class in a device table.
pub const TYPE_KEY: &str = "type";

/// One named device entry: a class reference plus free-form parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceDeclaration {
    /// Fully qualified device class, e.g. `nicos.devices.generic.Axis`.
    #[serde(rename = "type")]
    pub class: String,
    #[serde(flatten)]
    pub params: BTreeMap<String, ParamValue>,
}

impl DeviceDeclaration {
    pub fn new(class: impl Into<String>, params: BTreeMap<String, ParamValue>) -> Self {
        Self { class: class.into(), params }
    }

    /// Split the `type` key off a raw device table.
    ///
    /// Returns the reason when the table has no usable type reference.
    pub fn from_table(mut table: BTreeMap<String, ParamValue>) -> Result<Self, String> {
        match table.remove(TYPE_KEY) {
            Some(ParamValue::String(class)) if !class.trim().is_empty() => {
                Ok(Self { class, params: table })
            }
            Some(ParamValue::String(_)) => Err("device type reference is empty".to_string()),
            Some(other) => {
                Err(format!("device type reference must be a string, got {}", other.type_name()))
            }
            None => Err("device entry is missing its 'type' reference".to_string()),
        }
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    pub fn description(&self) -> Option<&str> {
        self.param("description").and_then(ParamValue::as_str)
    }

    /// Whether the device shows up in user-facing device lists.
    ///
    /// An explicit `visibility` list wins; otherwise the legacy `lowlevel`
    /// flag hides the device.
    pub fn is_listed(&self) -> bool {
        if let Some(visibility) = self.param("visibility").and_then(ParamValue::as_str_list) {
            return visibility.contains(&"devlist");
        }
        !self.param("lowlevel").and_then(ParamValue::as_bool).unwrap_or(false)
    }
}
