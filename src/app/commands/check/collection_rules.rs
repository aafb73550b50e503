//! Checks that look at all setups of a catalog together.

use std::collections::BTreeMap;

use crate::domain::resolve::SetupResolver;
use crate::domain::setup::{EXPERIMENT_DEVICE, Setup, SetupGroup};
use crate::ports::{DeviceClassCatalog, SetupEntry, SetupRegistry};

use super::diagnostics::Diagnostics;

/// Devices that every instrument setup may declare on its own.
const SHARED_DEVICES: [&str; 2] = ["Sample", EXPERIMENT_DEVICE];

pub fn unreadable_checks<R: SetupRegistry>(registry: &R, diagnostics: &mut Diagnostics) {
    for name in registry.names() {
        if let Some(SetupEntry::Unreadable { reason, .. }) = registry.entry(name) {
            diagnostics.push_error(name, format!("could not read setup: {}", reason));
        }
    }
}

/// Warn about device names declared by more than one setup.
///
/// Setups are visited in name order and each device is compared with the
/// first setup that declared it.
pub fn duplicate_device_checks<R: SetupRegistry>(registry: &R, diagnostics: &mut Diagnostics) {
    let mut seen: BTreeMap<&str, &Setup> = BTreeMap::new();

    for setup in registry.setups() {
        if setup.group == SetupGroup::Special {
            continue;
        }
        for (device, declaration) in &setup.devices {
            let Some(other) = seen.get(device.as_str()) else {
                seen.insert(device, setup);
                continue;
            };
            if setup.group == SetupGroup::Basic && other.group == SetupGroup::Basic {
                continue;
            }
            if mutually_exclusive(setup, other) {
                continue;
            }
            if SHARED_DEVICES.contains(&device.as_str())
                || declaration.params.contains_key("instrument")
            {
                continue;
            }
            diagnostics.push_warning(
                setup.name.as_str(),
                format!("device name {} duplicate: also in {}", device, other.name),
            );
        }
    }
}

fn mutually_exclusive(a: &Setup, b: &Setup) -> bool {
    a.excludes.iter().any(|e| e == b.name.as_str())
        || b.excludes.iter().any(|e| e == a.name.as_str())
}

/// Every setup that may be loaded must also resolve.
pub fn resolution_checks<R, C>(registry: &R, classes: &C, diagnostics: &mut Diagnostics)
where
    R: SetupRegistry,
    C: DeviceClassCatalog,
{
    for setup in registry.setups() {
        if !setup.is_loadable(false) {
            continue;
        }
        let name = setup.name.as_str();
        if let Err(err) = SetupResolver::resolve(name, registry, classes) {
            diagnostics.push_error(name, format!("setup does not resolve: {}", err));
        }
    }
}
