//! The flat result of resolving one or more setups.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::AppError;
use crate::domain::device::{DeviceDeclaration, DeviceSpec};
use crate::domain::setup::{AliasTable, SysConfig};

/// A device in the resolved table, with the setup that declared it last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDevice {
    pub setup: String,
    #[serde(flatten)]
    pub declaration: DeviceDeclaration,
    pub spec: DeviceSpec,
    /// Attached-device parameters as `(parameter, device)` pairs.
    #[serde(skip)]
    pub references: Vec<(String, String)>,
}

/// Start-up code contributed by one setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupBlock {
    pub setup: String,
    pub code: String,
}

/// A reference to a device that is not part of the resolved table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Referring device, or `"sysconfig"`.
    pub source: String,
    pub param: String,
    pub target: String,
}

/// Everything a runtime needs to activate a set of setups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    /// Explicitly requested setups.
    pub roots: Vec<String>,
    /// Every loaded setup, dependencies first.
    pub loaded: Vec<String>,
    pub modules: Vec<String>,
    #[serde(skip_serializing_if = "SysConfig::is_empty")]
    pub sysconfig: SysConfig,
    #[serde(skip_serializing_if = "AliasTable::is_empty")]
    pub aliases: AliasTable,
    pub startup: Vec<StartupBlock>,
    pub devices: BTreeMap<String, ResolvedDevice>,
}

impl ResolvedConfiguration {
    pub fn device(&self, name: &str) -> Option<&ResolvedDevice> {
        self.devices.get(name)
    }

    pub fn device_names(&self) -> Vec<&str> {
        self.devices.keys().map(String::as_str).collect()
    }

    pub fn is_loaded(&self, setup: &str) -> bool {
        self.loaded.iter().any(|s| s == setup)
    }

    /// All start-up blocks joined in execution order.
    pub fn startup_code(&self) -> String {
        self.startup.iter().map(|block| block.code.as_str()).collect::<Vec<_>>().join("\n")
    }

    /// SHA-256 over the canonical JSON form, hex encoded.
    pub fn fingerprint(&self) -> Result<String, AppError> {
        let canonical = serde_json::to_vec(self).map_err(|err| AppError::ParseError {
            what: "resolved configuration".to_string(),
            details: err.to_string(),
        })?;
        let digest = Sha256::digest(&canonical);
        Ok(digest.iter().map(|byte| format!("{:02x}", byte)).collect())
    }

    /// Attached devices and sysconfig entries naming devices that are not in the table.
    ///
    /// Alias names count as present.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let known = |name: &str| {
            self.devices.contains_key(name) || self.aliases.get(name).is_some()
        };
        let mut missing = Vec::new();

        for (device, resolved) in &self.devices {
            for (param, target) in &resolved.references {
                if !known(target) {
                    missing.push(UnresolvedReference {
                        source: device.clone(),
                        param: param.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        let mut reported = BTreeSet::new();
        for target in self.sysconfig.referenced_devices() {
            if !known(target) && reported.insert(target) {
                missing.push(UnresolvedReference {
                    source: "sysconfig".to_string(),
                    param: sysconfig_key(&self.sysconfig, target).to_string(),
                    target: target.to_string(),
                });
            }
        }
        missing
    }
}

fn sysconfig_key(sysconfig: &SysConfig, target: &str) -> &'static str {
    if sysconfig.instrument.as_deref() == Some(target) {
        "instrument"
    } else if sysconfig.experiment.as_deref() == Some(target) {
        "experiment"
    } else if sysconfig.datasinks.contains(target) {
        "datasinks"
    } else {
        "notifiers"
    }
}
