//! Checks on the top-level entries of a single setup.

use crate::domain::setup::{Setup, SetupGroup};
use crate::ports::SetupRegistry;

use super::diagnostics::Diagnostics;

/// Setups that must be in the `lowlevel` group.
const LOWLEVEL_ONLY: [&str; 2] = ["system", "startup"];

pub fn setup_checks<R: SetupRegistry>(setup: &Setup, registry: &R, diagnostics: &mut Diagnostics) {
    let location = setup.name.as_str();

    if let Some(group) = &setup.invalid_group {
        diagnostics.push_warning(
            location,
            format!(
                "invalid setup group '{}', treated as optional (valid: {})",
                group,
                SetupGroup::valid_names()
            ),
        );
    }

    if LOWLEVEL_ONLY.contains(&location) && setup.group != SetupGroup::Lowlevel {
        diagnostics
            .push_error(location, format!("'{}' is not in 'lowlevel' setup group", location));
    }
    if location == "startup" && !setup.includes.is_empty() {
        diagnostics.push_error(location, "the startup setup must not include other setups");
    }

    if setup.description.as_deref().is_none_or(|d| d.trim().is_empty()) {
        diagnostics.push_error(location, "missing user-friendly setup description");
    }

    for key in &setup.unknown_keys {
        match key.as_str() {
            "include" => diagnostics.push_error(location, "'include' should be 'includes'"),
            "exclude" => diagnostics.push_error(location, "'exclude' should be 'excludes'"),
            "require" | "requires" => diagnostics
                .push_error(location, format!("'{}' should be substituted by 'includes'", key)),
            other => {
                diagnostics.push_warning(location, format!("unknown setup entry '{}'", other))
            }
        }
    }

    for include in &setup.includes {
        if !registry.contains(include) {
            diagnostics.push_error(location, format!("include '{}' is not a known setup", include));
        }
    }
    for exclude in &setup.excludes {
        if !registry.contains(exclude) {
            diagnostics
                .push_warning(location, format!("exclude '{}' is not a known setup", exclude));
        }
    }

    if !(0..=100).contains(&setup.display_order) {
        diagnostics.push_error(location, "display_order should be an integer between 0 and 100");
    }

    for (alias, targets) in &setup.alias_config {
        for target in targets.keys() {
            let base = target.split('.').next().unwrap_or(target);
            if !setup.devices.contains_key(target) && !setup.devices.contains_key(base) {
                diagnostics.push_error(
                    location,
                    format!(
                        "alias_config target '{}' of alias '{}' is not a device of this setup",
                        target, alias
                    ),
                );
            }
        }
    }

    if let Some(representative) = setup.representative()
        && !setup.devices.contains_key(representative)
        && !setup.alias_config.contains_key(representative)
    {
        diagnostics.push_error(
            location,
            format!("extended representative '{}' is not a device or alias", representative),
        );
    }
}
