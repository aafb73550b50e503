use std::path::PathBuf;

use serde::Serialize;

use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::setup::SetupGroup;
use crate::ports::{DeviceClassCatalog, SetupEntry, SetupRegistry};

/// One line of `labsetup list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupSummary {
    pub name: String,
    pub group: Option<SetupGroup>,
    pub description: String,
    /// Set when the setup file could not be read.
    pub error: Option<String>,
}

/// Everything `labsetup show` prints about one setup.
#[derive(Debug, Clone, Serialize)]
pub struct SetupDetail {
    pub name: String,
    pub description: String,
    pub group: SetupGroup,
    pub display_order: i64,
    pub sources: Vec<PathBuf>,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    pub modules: Vec<String>,
    pub devices: Vec<DeviceSummary>,
    pub aliases: Vec<String>,
    pub startupcode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSummary {
    pub name: String,
    pub class: String,
    pub description: Option<String>,
}

/// List setups, optionally only those of one group.
///
/// Setups are ordered by group, then display order, then name. Unreadable
/// setups are only listed without a group filter.
pub fn list<R: SetupRegistry, C: DeviceClassCatalog>(
    ctx: &AppContext<R, C>,
    group: Option<SetupGroup>,
) -> Vec<SetupSummary> {
    let registry = ctx.setups();
    let mut readable = Vec::new();
    let mut unreadable = Vec::new();

    for name in registry.names() {
        match registry.entry(name) {
            Some(SetupEntry::Ready(setup)) => {
                if group.is_some_and(|g| g != setup.group) {
                    continue;
                }
                readable.push((
                    setup.group,
                    setup.display_order,
                    SetupSummary {
                        name: setup.name.to_string(),
                        group: Some(setup.group),
                        description: setup.description().to_string(),
                        error: None,
                    },
                ));
            }
            Some(SetupEntry::Unreadable { name, reason }) if group.is_none() => {
                unreadable.push(SetupSummary {
                    name: name.clone(),
                    group: None,
                    description: String::new(),
                    error: Some(reason.clone()),
                });
            }
            _ => {}
        }
    }

    readable.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.name.cmp(&b.2.name)));
    readable.into_iter().map(|(_, _, summary)| summary).chain(unreadable).collect()
}

/// Describe a single setup as read, without resolving its includes.
pub fn show<R: SetupRegistry, C: DeviceClassCatalog>(
    ctx: &AppContext<R, C>,
    name: &str,
) -> Result<SetupDetail, AppError> {
    let setup = ctx.setups().lookup(name, None)?;

    let devices = setup
        .devices
        .iter()
        .map(|(name, declaration)| DeviceSummary {
            name: name.clone(),
            class: declaration.class.clone(),
            description: declaration.description().map(str::to_string),
        })
        .collect();

    Ok(SetupDetail {
        name: setup.name.to_string(),
        description: setup.description().to_string(),
        group: setup.group,
        display_order: setup.display_order,
        sources: setup.sources.clone(),
        includes: setup.includes.clone(),
        excludes: setup.excludes.clone(),
        modules: setup.modules.clone(),
        devices,
        aliases: setup.alias_config.keys().cloned().collect(),
        startupcode: setup.startupcode.trim().to_string(),
    })
}
