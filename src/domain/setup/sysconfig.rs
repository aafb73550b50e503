//! System configuration overrides (`[sysconfig]` table of a setup).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{AppError, ParamValue};

/// Name the experiment device must carry when one is configured.
pub const EXPERIMENT_DEVICE: &str = "Exp";

/// Cache host, data sinks, notifiers and instrument/experiment bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysConfig {
    /// Cache server address, e.g. `"localhost:14869"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<String>,
    /// Name of the instrument device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    /// Name of the experiment device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub datasinks: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub notifiers: BTreeSet<String>,
    /// Keys without dedicated handling; merged last-writer-wins.
    #[serde(flatten)]
    pub extra: BTreeMap<String, ParamValue>,
}

impl SysConfig {
    pub fn is_empty(&self) -> bool {
        self == &SysConfig::default()
    }

    /// Merge `other` into `self`.
    ///
    /// `datasinks` and `notifiers` accumulate; every other key is replaced
    /// when `other` sets it.
    pub fn merge(&mut self, other: &SysConfig) {
        if other.cache.is_some() {
            self.cache.clone_from(&other.cache);
        }
        if other.instrument.is_some() {
            self.instrument.clone_from(&other.instrument);
        }
        if other.experiment.is_some() {
            self.experiment.clone_from(&other.experiment);
        }
        self.datasinks.extend(other.datasinks.iter().cloned());
        self.notifiers.extend(other.notifiers.iter().cloned());
        for (key, value) in &other.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }

    /// Check invariants of a fully merged configuration.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.experiment.as_deref() {
            Some(name) if name != EXPERIMENT_DEVICE => Err(AppError::InvalidSysconfig(format!(
                "the experiment device must be named \"{}\", not \"{}\"",
                EXPERIMENT_DEVICE, name
            ))),
            _ => Ok(()),
        }
    }

    /// Device names referenced by the configuration.
    pub fn referenced_devices(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        names.extend(self.instrument.as_deref());
        names.extend(self.experiment.as_deref());
        names.extend(self.datasinks.iter().map(String::as_str));
        names.extend(self.notifiers.iter().map(String::as_str));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sysconfig(toml_src: &str) -> SysConfig {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn merge_unions_sinks_and_overrides_scalars() {
        let mut base = sysconfig(
            r#"
            cache = "oldhost"
            datasinks = ["conssink", "filesink"]
            notifiers = ["email"]
            "#,
        );
        let overlay = sysconfig(
            r#"
            cache = "newhost"
            instrument = "toftof"
            datasinks = ["livesink", "filesink"]
            "#,
        );

        base.merge(&overlay);

        assert_eq!(base.cache.as_deref(), Some("newhost"));
        assert_eq!(base.instrument.as_deref(), Some("toftof"));
        assert_eq!(base.datasinks.len(), 3);
        assert!(base.notifiers.contains("email"));
    }

    #[test]
    fn merge_keeps_existing_when_unset() {
        let mut base = sysconfig("cache = 'host'\nexperiment = 'Exp'");
        base.merge(&SysConfig::default());
        assert_eq!(base.cache.as_deref(), Some("host"));
        assert_eq!(base.experiment.as_deref(), Some("Exp"));
    }

    #[test]
    fn extra_keys_are_kept() {
        let config = sysconfig("elog = 'ElogSink'");
        assert_eq!(config.extra["elog"].as_str(), Some("ElogSink"));
    }

    #[test]
    fn experiment_must_be_named_exp() {
        assert!(sysconfig("experiment = 'Exp'").validate().is_ok());
        let err = sysconfig("experiment = 'Experiment'").validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidSysconfig(_)));
    }

    #[test]
    fn datasinks_must_be_a_list() {
        assert!(toml::from_str::<SysConfig>("datasinks = 'conssink'").is_err());
    }
}
