//! In-memory device class catalog.

use std::collections::BTreeMap;

use crate::domain::device::{Capability, DeviceClass, ParamKind};
use crate::ports::DeviceClassCatalog;

/// Catalog with hand-picked classes; empty by default, so every class is generic.
#[derive(Debug, Clone, Default)]
pub struct MemoryClassCatalog {
    classes: BTreeMap<String, DeviceClass>,
}

#[allow(dead_code)]
impl MemoryClassCatalog {
    pub fn with_class(
        name: &str,
        capability: Capability,
        mandatory: &[&str],
        params: &[(&str, ParamKind)],
    ) -> Self {
        Self::default().class(name, capability, mandatory, params)
    }

    pub fn class(
        mut self,
        name: &str,
        capability: Capability,
        mandatory: &[&str],
        params: &[(&str, ParamKind)],
    ) -> Self {
        let class = DeviceClass {
            name: name.to_string(),
            capability,
            summary: String::new(),
            mandatory: mandatory.iter().map(|m| m.to_string()).collect(),
            params: params.iter().map(|(p, k)| (p.to_string(), *k)).collect(),
            alias: false,
        };
        self.classes.insert(name.to_string(), class);
        self
    }

    pub fn alias_class(mut self, name: &str) -> Self {
        self = self.class(name, Capability::Plain, &[], &[("alias", ParamKind::String)]);
        if let Some(class) = self.classes.get_mut(name) {
            class.alias = true;
        }
        self
    }
}

impl DeviceClassCatalog for MemoryClassCatalog {
    fn get(&self, name: &str) -> Option<&DeviceClass> {
        self.classes.get(name)
    }

    fn list_all(&self) -> Vec<&DeviceClass> {
        self.classes.values().collect()
    }
}
