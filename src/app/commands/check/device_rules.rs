//! Checks on the device declarations of a single setup.

use crate::domain::device::{DeviceClass, DeviceDeclaration, DeviceSpec, fmtstr};
use crate::domain::setup::{Setup, SetupGroup};
use crate::domain::{DeviceName, ParamValue};
use crate::ports::DeviceClassCatalog;

use super::diagnostics::Diagnostics;

pub fn device_checks<C: DeviceClassCatalog>(
    setup: &Setup,
    classes: &C,
    diagnostics: &mut Diagnostics,
) {
    let location = setup.name.as_str();
    let service_setup = matches!(setup.group, SetupGroup::Special | SetupGroup::Configdata);

    for (device, reason) in &setup.malformed {
        diagnostics.push_error(location, format!("{}: {}", device, reason));
    }

    for (device, declaration) in &setup.devices {
        if let Err(err) = DeviceName::new(device) {
            diagnostics.push_error(location, err.to_string());
        }

        if declaration.params.contains_key("lowlevel") {
            diagnostics.push_warning(
                location,
                format!("{}: \"lowlevel\" parameter is deprecated, use visibility", device),
            );
        }

        if let Some(ParamValue::String(value)) = declaration.param("fmtstr")
            && let Err(reason) = fmtstr::check(value)
        {
            diagnostics.push_error(location, format!("{}: invalid fmtstr: {}", device, reason));
        }

        let class = classes.get(&declaration.class);
        let is_alias = class.is_some_and(|c| c.alias);
        let listed = declaration.is_listed() && !is_alias;
        if !service_setup && listed && declaration.description().is_none() {
            diagnostics.push_warning(location, format!("{}: device has no description", device));
        }

        match class {
            Some(class) => class_checks(location, device, declaration, class, diagnostics),
            None => diagnostics.push_warning(
                location,
                format!("{}: device class '{}' is not in the catalog", device, declaration.class),
            ),
        }
    }
}

fn class_checks(
    location: &str,
    device: &str,
    declaration: &DeviceDeclaration,
    class: &DeviceClass,
    diagnostics: &mut Diagnostics,
) {
    let before = diagnostics.error_count();

    for name in &class.mandatory {
        if !declaration.params.contains_key(name) {
            let message = format!("{}: mandatory parameter '{}' missing", device, name);
            diagnostics.push_error(location, message);
        }
    }

    let mut unknown = Vec::new();
    for (name, value) in &declaration.params {
        match class.param_kind(name) {
            Some(kind) if !kind.accepts(value) => diagnostics.push_error(
                location,
                format!(
                    "{}: parameter '{}' value {} is invalid: expected {}",
                    device, name, value, kind
                ),
            ),
            Some(_) => {}
            None => unknown.push(name.as_str()),
        }
    }
    if !unknown.is_empty() {
        diagnostics.push_error(
            location,
            format!(
                "{}: configured parameters not accepted by the device class: {}",
                device,
                unknown.join(", ")
            ),
        );
    }

    if diagnostics.error_count() == before
        && let Err(reason) = DeviceSpec::classify(declaration, Some(class))
    {
        diagnostics.push_error(location, format!("{}: {}", device, reason));
    }
}
