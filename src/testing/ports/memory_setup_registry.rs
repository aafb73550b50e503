//! In-memory setup registry for resolver and checker tests.

use std::collections::BTreeMap;

use crate::domain::setup::Setup;
use crate::ports::{SetupEntry, SetupRegistry};

#[derive(Debug, Clone, Default)]
pub struct MemorySetupRegistry {
    entries: BTreeMap<String, SetupEntry>,
}

#[allow(dead_code)]
impl MemorySetupRegistry {
    pub fn new(setups: Vec<Setup>) -> Self {
        let entries = setups
            .into_iter()
            .map(|setup| (setup.name.to_string(), SetupEntry::Ready(setup)))
            .collect();
        Self { entries }
    }

    pub fn add_unreadable(&mut self, name: &str, reason: &str) {
        self.entries.insert(
            name.to_string(),
            SetupEntry::Unreadable { name: name.to_string(), reason: reason.to_string() },
        );
    }
}

impl SetupRegistry for MemorySetupRegistry {
    fn entry(&self, name: &str) -> Option<&SetupEntry> {
        self.entries.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
