use std::collections::BTreeMap;

use crate::domain::device::DeviceDeclaration;
use crate::domain::setup::{Setup, SetupGroup};
use crate::domain::{ParamValue, SetupName};

/// Builder for in-memory setups used in domain and app unit tests.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SetupBuilder {
    setup: Setup,
}

#[allow(dead_code)]
impl SetupBuilder {
    pub fn new(name: &str) -> Self {
        Self { setup: Setup::new(SetupName::new(name).unwrap()) }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.setup.description = Some(description.to_string());
        self
    }

    pub fn group(mut self, group: SetupGroup) -> Self {
        self.setup.group = group;
        self.setup.explicit.group = true;
        self
    }

    pub fn include(mut self, name: &str) -> Self {
        self.setup.includes.push(name.to_string());
        self
    }

    pub fn exclude(mut self, name: &str) -> Self {
        self.setup.excludes.push(name.to_string());
        self
    }

    pub fn module(mut self, name: &str) -> Self {
        self.setup.modules.push(name.to_string());
        self
    }

    pub fn device(self, name: &str, class: &str) -> Self {
        self.device_with(name, class, &[])
    }

    pub fn device_with(mut self, name: &str, class: &str, params: &[(&str, ParamValue)]) -> Self {
        let params: BTreeMap<String, ParamValue> =
            params.iter().map(|(key, value)| (key.to_string(), value.clone())).collect();
        self.setup.devices.insert(name.to_string(), DeviceDeclaration::new(class, params));
        self
    }

    pub fn startup(mut self, code: &str) -> Self {
        self.setup.startupcode = code.to_string();
        self
    }

    pub fn sysconfig_cache(mut self, host: &str) -> Self {
        self.setup.sysconfig.cache = Some(host.to_string());
        self
    }

    pub fn alias(mut self, alias: &str, device: &str, priority: i64) -> Self {
        self.setup
            .alias_config
            .entry(alias.to_string())
            .or_default()
            .insert(device.to_string(), priority);
        self
    }

    pub fn build(self) -> Setup {
        self.setup
    }
}
