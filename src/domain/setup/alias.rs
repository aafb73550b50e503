//! Device alias preferences collected from `alias_config` tables.

use std::collections::BTreeMap;

use serde::Serialize;

/// One candidate target for an alias device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasTarget {
    pub device: String,
    pub priority: i64,
    /// Setup that contributed this preference.
    pub setup: String,
}

/// Alias name mapped to its candidate targets, highest priority first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasTable(BTreeMap<String, Vec<AliasTarget>>);

impl AliasTable {
    /// Record the `alias_config` of one setup.
    ///
    /// Setup files are read into sorted maps, so targets of one setup are
    /// added in target-name order. After [`AliasTable::sort`], equal
    /// priorities within a setup therefore rank alphabetically, and across
    /// setups by load order.
    pub fn add_setup(&mut self, setup: &str, config: &BTreeMap<String, BTreeMap<String, i64>>) {
        for (alias, targets) in config {
            let entry = self.0.entry(alias.clone()).or_default();
            for (device, priority) in targets {
                entry.push(AliasTarget {
                    device: device.clone(),
                    priority: *priority,
                    setup: setup.to_string(),
                });
            }
        }
    }

    /// Sort every target list by descending priority.
    ///
    /// The sort is stable, so equal priorities keep load order.
    pub fn sort(&mut self) {
        for targets in self.0.values_mut() {
            targets.sort_by(|a, b| b.priority.cmp(&a.priority));
        }
    }

    /// Preferred target of an alias.
    pub fn preferred(&self, alias: &str) -> Option<&AliasTarget> {
        self.0.get(alias).and_then(|targets| targets.first())
    }

    pub fn get(&self, alias: &str) -> Option<&[AliasTarget]> {
        self.0.get(alias).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<AliasTarget>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
