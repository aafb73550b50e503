//! Parsing of setup files (TOML or YAML) into [`Setup`] values.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use super::group::SetupGroup;
use super::interpolate::{Vars, interpolate_table};
use super::model::{DEFAULT_DISPLAY_ORDER, ExplicitKeys, Setup};
use super::sysconfig::SysConfig;
use crate::domain::device::DeviceDeclaration;
use crate::domain::{AppError, ParamValue, SetupName};

/// Serialization format of a setup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFormat {
    Toml,
    Yaml,
}

impl SetupFormat {
    pub const EXTENSIONS: [&'static str; 3] = ["toml", "yml", "yaml"];

    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(SetupFormat::Toml),
            "yml" | "yaml" => Some(SetupFormat::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for SetupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupFormat::Toml => f.write_str("TOML"),
            SetupFormat::Yaml => f.write_str("YAML"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSetup {
    description: Option<String>,
    group: Option<String>,
    #[serde(default)]
    includes: Vec<String>,
    #[serde(default)]
    excludes: Vec<String>,
    #[serde(default)]
    modules: Vec<String>,
    #[serde(default)]
    devices: BTreeMap<String, BTreeMap<String, Option<ParamValue>>>,
    #[serde(default)]
    startupcode: String,
    #[serde(default)]
    sysconfig: BTreeMap<String, Option<ParamValue>>,
    #[serde(default)]
    alias_config: BTreeMap<String, BTreeMap<String, i64>>,
    display_order: Option<i64>,
    #[serde(default)]
    extended: BTreeMap<String, Option<ParamValue>>,
    #[serde(default)]
    vars: Vars,
    #[serde(flatten)]
    unknown: BTreeMap<String, Option<ParamValue>>,
}

/// Keys set to YAML `null` (`~`) count as not set.
fn drop_nulls(table: BTreeMap<String, Option<ParamValue>>) -> BTreeMap<String, ParamValue> {
    table.into_iter().filter_map(|(key, value)| Some((key, value?))).collect()
}

/// Parse the content of one setup file.
///
/// Devices without a usable `type` do not fail the parse; they are recorded
/// in [`Setup::malformed`] so resolution can report them precisely.
pub fn parse_setup(
    name: &SetupName,
    format: SetupFormat,
    content: &str,
) -> Result<Setup, AppError> {
    let raw: RawSetup = match format {
        SetupFormat::Toml => toml::from_str(content).map_err(|err| parse_error(name, format, err)),
        SetupFormat::Yaml if content.trim().is_empty() => {
            serde_yaml::from_str("{}").map_err(|err| parse_error(name, format, err))
        }
        SetupFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|err| parse_error(name, format, err))
        }
    }?;

    let mut setup = Setup::new(name.clone());
    setup.description = raw.description;
    setup.includes = raw.includes;
    setup.excludes = raw.excludes;
    setup.modules = raw.modules;
    setup.startupcode = raw.startupcode;
    setup.alias_config = raw.alias_config;
    setup.explicit =
        ExplicitKeys { group: raw.group.is_some(), display_order: raw.display_order.is_some() };
    setup.display_order = raw.display_order.unwrap_or(DEFAULT_DISPLAY_ORDER);
    setup.extended = drop_nulls(raw.extended);
    setup.unknown_keys = raw.unknown.into_keys().collect();

    if let Some(group) = raw.group {
        match group.parse::<SetupGroup>() {
            Ok(group) => setup.group = group,
            Err(err) => {
                warn!(setup = %name, "{}; using 'optional'", err);
                setup.invalid_group = Some(group);
            }
        }
    }

    for (device, table) in raw.devices {
        let what = format!("device '{}' parameter", device);
        let table = interpolate_table(&drop_nulls(table), &raw.vars, &what)?;
        match DeviceDeclaration::from_table(table) {
            Ok(declaration) => {
                setup.devices.insert(device, declaration);
            }
            Err(reason) => {
                setup.malformed.insert(device, reason);
            }
        }
    }

    let sysconfig = interpolate_table(&drop_nulls(raw.sysconfig), &raw.vars, "sysconfig key")?;
    setup.sysconfig = sysconfig_from_table(sysconfig)?;
    setup.vars = raw.vars;

    Ok(setup)
}

fn sysconfig_from_table(table: BTreeMap<String, ParamValue>) -> Result<SysConfig, AppError> {
    let json = serde_json::to_value(table).map_err(sysconfig_error)?;
    serde_json::from_value(json).map_err(sysconfig_error)
}

fn sysconfig_error(err: impl fmt::Display) -> AppError {
    AppError::ParseError { what: "sysconfig".to_string(), details: err.to_string() }
}

fn parse_error(name: &SetupName, format: SetupFormat, err: impl fmt::Display) -> AppError {
    AppError::ParseError { what: format!("{} setup '{}'", format, name), details: err.to_string() }
}
