use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use super::group::SetupGroup;
use super::sysconfig::SysConfig;
use crate::domain::device::DeviceDeclaration;
use crate::domain::{ParamValue, SetupName};

/// Position used for setups that do not set `display_order`.
pub const DEFAULT_DISPLAY_ORDER: i64 = 50;

/// Top-level scalars a setup file wrote out, as opposed to left at their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitKeys {
    pub group: bool,
    pub display_order: bool,
}

/// One setup as read from its file(s).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setup {
    pub name: SetupName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub group: SetupGroup,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub modules: Vec<String>,
    pub devices: BTreeMap<String, DeviceDeclaration>,
    /// Devices whose table could not be turned into a declaration, with the reason.
    #[serde(skip)]
    pub malformed: BTreeMap<String, String>,
    pub startupcode: String,
    #[serde(skip_serializing_if = "SysConfig::is_empty")]
    pub sysconfig: SysConfig,
    pub alias_config: BTreeMap<String, BTreeMap<String, i64>>,
    pub display_order: i64,
    pub extended: BTreeMap<String, ParamValue>,
    #[serde(skip)]
    pub vars: BTreeMap<String, ParamValue>,
    /// Group string that was not recognized; the setup fell back to `optional`.
    #[serde(skip)]
    pub invalid_group: Option<String>,
    /// Top-level keys that are not part of the setup format.
    #[serde(skip)]
    pub unknown_keys: Vec<String>,
    #[serde(skip)]
    pub explicit: ExplicitKeys,
    /// Files the setup was read from, in merge order.
    #[serde(skip)]
    pub sources: Vec<PathBuf>,
}

impl Setup {
    /// Empty setup with every field at its default.
    pub fn new(name: SetupName) -> Self {
        Self {
            name,
            description: None,
            group: SetupGroup::default(),
            includes: Vec::new(),
            excludes: Vec::new(),
            modules: Vec::new(),
            devices: BTreeMap::new(),
            malformed: BTreeMap::new(),
            startupcode: String::new(),
            sysconfig: SysConfig::default(),
            alias_config: BTreeMap::new(),
            display_order: DEFAULT_DISPLAY_ORDER,
            extended: BTreeMap::new(),
            vars: BTreeMap::new(),
            invalid_group: None,
            unknown_keys: Vec::new(),
            explicit: ExplicitKeys::default(),
            sources: Vec::new(),
        }
    }

    /// Description, falling back to the setup name.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn is_loadable(&self, allow_special: bool) -> bool {
        self.group.is_loadable(allow_special)
    }

    /// Device or alias named by `extended.representative`.
    pub fn representative(&self) -> Option<&str> {
        self.extended.get("representative").and_then(ParamValue::as_str)
    }

    /// Merge a second definition of the same setup into this one.
    ///
    /// Scalars from `other` win when its file sets them, even to the default
    /// value. Lists are extended and tables are updated key by key. Start-up
    /// code is appended on a new line.
    pub fn extend(&mut self, other: Setup) {
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.explicit.group {
            self.group = other.group;
            self.invalid_group = other.invalid_group;
            self.explicit.group = true;
        }
        if other.explicit.display_order {
            self.display_order = other.display_order;
            self.explicit.display_order = true;
        }
        self.includes.extend(other.includes);
        self.excludes.extend(other.excludes);
        self.modules.extend(other.modules);
        for (name, declaration) in other.devices {
            self.malformed.remove(&name);
            self.devices.insert(name, declaration);
        }
        for (name, reason) in other.malformed {
            self.devices.remove(&name);
            self.malformed.insert(name, reason);
        }
        if !other.startupcode.is_empty() {
            if !self.startupcode.is_empty() {
                self.startupcode.push('\n');
            }
            self.startupcode.push_str(&other.startupcode);
        }
        self.sysconfig.merge(&other.sysconfig);
        self.alias_config.extend(other.alias_config);
        self.extended.extend(other.extended);
        self.vars.extend(other.vars);
        self.unknown_keys.extend(other.unknown_keys);
        self.sources.extend(other.sources);
    }
}
