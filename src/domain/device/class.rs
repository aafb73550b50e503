//! Device class schemas: capability and accepted parameters per class.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::identifiers::validation::validate_device_name;
use crate::domain::{Limits, ParamValue};

/// What a device of a class can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Infrastructure without a value (buses, sinks, the experiment).
    Plain,
    Readable,
    Moveable,
    Switchable,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Plain => "plain",
            Capability::Readable => "readable",
            Capability::Moveable => "moveable",
            Capability::Switchable => "switchable",
        }
    }
}

/// Expected shape of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    String,
    Float,
    Integer,
    Bool,
    Limits,
    /// Name of another device (an attached device).
    Device,
    DeviceList,
    StringList,
    Table,
    Any,
}

impl ParamKind {
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match self {
            ParamKind::String => value.as_str().is_some(),
            ParamKind::Float => value.as_f64().is_some(),
            ParamKind::Integer => value.as_i64().is_some(),
            ParamKind::Bool => value.as_bool().is_some(),
            ParamKind::Limits => Limits::from_value(value).is_some(),
            ParamKind::Device => value.as_str().is_some_and(validate_device_name),
            ParamKind::DeviceList => value
                .as_str_list()
                .is_some_and(|names| names.iter().all(|name| validate_device_name(name))),
            ParamKind::StringList => value.as_str_list().is_some(),
            ParamKind::Table => value.as_table().is_some(),
            ParamKind::Any => true,
        }
    }

    /// Whether values of this kind name other devices.
    pub fn is_device_reference(&self) -> bool {
        matches!(self, ParamKind::Device | ParamKind::DeviceList)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParamKind::String => "a string",
            ParamKind::Float => "a number",
            ParamKind::Integer => "an integer",
            ParamKind::Bool => "a boolean",
            ParamKind::Limits => "a (min, max) pair",
            ParamKind::Device => "a device name",
            ParamKind::DeviceList => "a list of device names",
            ParamKind::StringList => "a list of strings",
            ParamKind::Table => "a table",
            ParamKind::Any => "any value",
        };
        f.write_str(label)
    }
}

const BASE_PARAMS: &[(&str, ParamKind)] = &[
    ("description", ParamKind::String),
    ("visibility", ParamKind::StringList),
    ("loglevel", ParamKind::String),
    ("lowlevel", ParamKind::Bool),
];

const READABLE_PARAMS: &[(&str, ParamKind)] = &[
    ("unit", ParamKind::String),
    ("fmtstr", ParamKind::String),
    ("maxage", ParamKind::Float),
    ("pollinterval", ParamKind::Float),
    ("warnlimits", ParamKind::Limits),
];

const MOVEABLE_PARAMS: &[(&str, ParamKind)] =
    &[("abslimits", ParamKind::Limits), ("userlimits", ParamKind::Limits)];

const SWITCHABLE_PARAMS: &[(&str, ParamKind)] =
    &[("states", ParamKind::StringList), ("mapping", ParamKind::Table)];

/// Schema of one device class, loaded from the class catalog.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeviceClass {
    /// Fully qualified class name.
    pub name: String,
    pub capability: Capability,
    #[serde(default)]
    pub summary: String,
    /// Parameters that must be configured.
    #[serde(default)]
    pub mandatory: Vec<String>,
    /// Class-specific parameters in addition to the capability defaults.
    #[serde(default)]
    pub params: BTreeMap<String, ParamKind>,
    /// Alias devices carry no description of their own.
    #[serde(default)]
    pub alias: bool,
}

impl DeviceClass {
    /// Kind of a parameter, looking at class-specific then capability defaults.
    pub fn param_kind(&self, name: &str) -> Option<ParamKind> {
        if let Some(kind) = self.params.get(name) {
            return Some(*kind);
        }
        self.common_params().iter().find(|(param, _)| *param == name).map(|(_, kind)| *kind)
    }

    pub fn accepts_param(&self, name: &str) -> bool {
        self.param_kind(name).is_some()
    }

    /// `(parameter, device)` pairs for every attached-device parameter set in `params`.
    pub fn device_references(
        &self,
        params: &BTreeMap<String, ParamValue>,
    ) -> Vec<(String, String)> {
        let mut references = Vec::new();
        for (name, value) in params {
            if !self.param_kind(name).is_some_and(|kind| kind.is_device_reference()) {
                continue;
            }
            let targets = match value {
                ParamValue::String(target) => vec![target.as_str()],
                other => other.as_str_list().unwrap_or_default(),
            };
            references.extend(targets.into_iter().map(|t| (name.clone(), t.to_string())));
        }
        references
    }

    fn common_params(&self) -> Vec<(&'static str, ParamKind)> {
        let mut params = BASE_PARAMS.to_vec();
        match self.capability {
            Capability::Plain => {}
            Capability::Readable => params.extend_from_slice(READABLE_PARAMS),
            Capability::Moveable => {
                params.extend_from_slice(READABLE_PARAMS);
                params.extend_from_slice(MOVEABLE_PARAMS);
            }
            Capability::Switchable => {
                params.extend_from_slice(READABLE_PARAMS);
                params.extend_from_slice(SWITCHABLE_PARAMS);
            }
        }
        params
    }
}
