//! Typed device specs built from declarations and class schemas.

use std::time::Duration;

use serde::Serialize;

use super::capability::{DEFAULT_FMTSTR, Moveable, Readable, Switchable};
use super::class::{Capability, DeviceClass};
use super::declaration::DeviceDeclaration;
use crate::domain::{Limits, ParamValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadableSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmtstr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollinterval: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnlimits: Option<Limits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoveableSpec {
    #[serde(flatten)]
    pub readable: ReadableSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abslimits: Option<Limits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userlimits: Option<Limits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwitchableSpec {
    #[serde(flatten)]
    pub readable: ReadableSpec,
    pub states: Vec<String>,
}

/// Capability-tagged view of a device declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "capability", rename_all = "lowercase")]
pub enum DeviceSpec {
    Plain,
    Readable(ReadableSpec),
    Moveable(MoveableSpec),
    Switchable(SwitchableSpec),
    /// The class is not in the catalog; parameters stay untyped.
    Generic,
}

impl DeviceSpec {
    /// Build the typed spec of a declaration.
    ///
    /// Without a class schema the device is `Generic`. With one, mandatory
    /// parameters must be present and every known parameter must match its
    /// kind; the returned error is a human-readable reason.
    pub fn classify(
        declaration: &DeviceDeclaration,
        class: Option<&DeviceClass>,
    ) -> Result<Self, String> {
        let Some(class) = class else {
            return Ok(DeviceSpec::Generic);
        };

        for name in &class.mandatory {
            if !declaration.params.contains_key(name) {
                return Err(format!("mandatory parameter '{}' missing", name));
            }
        }

        for (name, value) in &declaration.params {
            if let Some(kind) = class.param_kind(name)
                && !kind.accepts(value)
            {
                return Err(format!(
                    "parameter '{}' must be {}, got {} {}",
                    name,
                    kind,
                    value.type_name(),
                    value
                ));
            }
        }

        let spec = match class.capability {
            Capability::Plain => DeviceSpec::Plain,
            Capability::Readable => DeviceSpec::Readable(readable_spec(declaration)?),
            Capability::Moveable => DeviceSpec::Moveable(moveable_spec(declaration)?),
            Capability::Switchable => DeviceSpec::Switchable(switchable_spec(declaration)?),
        };
        Ok(spec)
    }

    pub fn capability(&self) -> Option<Capability> {
        match self {
            DeviceSpec::Plain => Some(Capability::Plain),
            DeviceSpec::Readable(_) => Some(Capability::Readable),
            DeviceSpec::Moveable(_) => Some(Capability::Moveable),
            DeviceSpec::Switchable(_) => Some(Capability::Switchable),
            DeviceSpec::Generic => None,
        }
    }

    pub fn as_readable(&self) -> Option<&dyn Readable> {
        match self {
            DeviceSpec::Readable(spec) => Some(spec),
            DeviceSpec::Moveable(spec) => Some(spec),
            DeviceSpec::Switchable(spec) => Some(spec),
            DeviceSpec::Plain | DeviceSpec::Generic => None,
        }
    }

    pub fn as_moveable(&self) -> Option<&dyn Moveable> {
        match self {
            DeviceSpec::Moveable(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn as_switchable(&self) -> Option<&dyn Switchable> {
        match self {
            DeviceSpec::Switchable(spec) => Some(spec),
            _ => None,
        }
    }
}

fn limits(declaration: &DeviceDeclaration, name: &str) -> Result<Option<Limits>, String> {
    let Some(value) = declaration.param(name) else {
        return Ok(None);
    };
    let limits =
        Limits::from_value(value).ok_or_else(|| format!("parameter '{}' must be a pair", name))?;
    if !limits.is_ordered() {
        return Err(format!("{} {} has min greater than max", name, limits));
    }
    Ok(Some(limits))
}

fn readable_spec(declaration: &DeviceDeclaration) -> Result<ReadableSpec, String> {
    let text = |name: &str| declaration.param(name).and_then(ParamValue::as_str).map(String::from);
    let number = |name: &str| declaration.param(name).and_then(ParamValue::as_f64);

    for name in ["pollinterval", "maxage"] {
        if number(name).is_some_and(|secs| secs < 0.0) {
            return Err(format!("parameter '{}' must not be negative", name));
        }
    }

    Ok(ReadableSpec {
        unit: text("unit"),
        fmtstr: text("fmtstr"),
        pollinterval: number("pollinterval"),
        maxage: number("maxage"),
        warnlimits: limits(declaration, "warnlimits")?,
    })
}

fn moveable_spec(declaration: &DeviceDeclaration) -> Result<MoveableSpec, String> {
    let abslimits = limits(declaration, "abslimits")?;
    let userlimits = limits(declaration, "userlimits")?;
    if let (Some(abs), Some(user)) = (abslimits, userlimits)
        && !user.within(&abs)
    {
        return Err(format!("userlimits {} exceed abslimits {}", user, abs));
    }
    Ok(MoveableSpec { readable: readable_spec(declaration)?, abslimits, userlimits })
}

fn switchable_spec(declaration: &DeviceDeclaration) -> Result<SwitchableSpec, String> {
    let states: Vec<String> =
        if let Some(list) = declaration.param("states").and_then(ParamValue::as_str_list) {
            list.into_iter().map(String::from).collect()
        } else if let Some(mapping) = declaration.param("mapping").and_then(ParamValue::as_table) {
            mapping.keys().cloned().collect()
        } else {
            Vec::new()
        };
    if states.is_empty() {
        return Err("switchable device needs 'states' or a non-empty 'mapping'".to_string());
    }
    Ok(SwitchableSpec { readable: readable_spec(declaration)?, states })
}

fn secs(value: Option<f64>) -> Option<Duration> {
    value.and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

impl Readable for ReadableSpec {
    fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    fn fmtstr(&self) -> &str {
        self.fmtstr.as_deref().unwrap_or(DEFAULT_FMTSTR)
    }

    fn poll_interval(&self) -> Option<Duration> {
        secs(self.pollinterval)
    }

    fn max_age(&self) -> Option<Duration> {
        secs(self.maxage)
    }

    fn warn_limits(&self) -> Option<Limits> {
        self.warnlimits
    }
}

macro_rules! delegate_readable {
    ($spec:ty) => {
        impl Readable for $spec {
            fn unit(&self) -> Option<&str> {
                self.readable.unit()
            }

            fn fmtstr(&self) -> &str {
                self.readable.fmtstr()
            }

            fn poll_interval(&self) -> Option<Duration> {
                self.readable.poll_interval()
            }

            fn max_age(&self) -> Option<Duration> {
                self.readable.max_age()
            }

            fn warn_limits(&self) -> Option<Limits> {
                self.readable.warn_limits()
            }
        }
    };
}

delegate_readable!(MoveableSpec);
delegate_readable!(SwitchableSpec);

impl Moveable for MoveableSpec {
    fn abs_limits(&self) -> Option<Limits> {
        self.abslimits
    }

    fn user_limits(&self) -> Option<Limits> {
        self.userlimits
    }
}

impl Switchable for SwitchableSpec {
    fn states(&self) -> &[String] {
        &self.states
    }
}
