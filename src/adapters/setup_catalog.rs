use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::setup::parse_setup;
use crate::domain::{AppError, SetupName};
use crate::ports::{SetupEntry, SetupFile, SetupRegistry, SetupSource};

/// All setups of a source, parsed and keyed by name.
///
/// A file that cannot be read or parsed is kept as an unreadable entry so
/// that only resolutions touching it fail.
#[derive(Debug, Clone, Default)]
pub struct SetupCatalog {
    entries: BTreeMap<String, SetupEntry>,
}

impl SetupCatalog {
    pub fn load<S: SetupSource + ?Sized>(source: &S) -> Result<Self, AppError> {
        let mut catalog = Self::default();
        for file in source.discover()? {
            if SetupName::new(&file.name).is_err() {
                warn!(path = %file.path.display(), "ignoring file with invalid setup name");
                continue;
            }
            let entry = read_entry(source, &file);
            catalog.insert(entry);
        }
        Ok(catalog)
    }

    fn insert(&mut self, entry: SetupEntry) {
        let Some(existing) = self.entries.get_mut(entry.name()) else {
            self.entries.insert(entry.name().to_string(), entry);
            return;
        };
        match (existing, entry) {
            (SetupEntry::Ready(existing), SetupEntry::Ready(other)) => {
                debug!(setup = %existing.name, "setup partially merged with another definition");
                existing.extend(other);
            }
            (slot @ SetupEntry::Ready(_), unreadable) => *slot = unreadable,
            (SetupEntry::Unreadable { .. }, _) => {}
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names and reasons of setups that could not be read.
    pub fn unreadable(&self) -> Vec<(&str, &str)> {
        self.entries
            .values()
            .filter_map(|entry| match entry {
                SetupEntry::Unreadable { name, reason } => Some((name.as_str(), reason.as_str())),
                SetupEntry::Ready(_) => None,
            })
            .collect()
    }
}

fn read_entry<S: SetupSource + ?Sized>(source: &S, file: &SetupFile) -> SetupEntry {
    let parsed = source.read(file).and_then(|content| {
        let name = SetupName::new(&file.name)?;
        parse_setup(&name, file.format, &content)
    });
    match parsed {
        Ok(mut setup) => {
            setup.sources.push(file.path.clone());
            SetupEntry::Ready(setup)
        }
        Err(err) => {
            warn!(setup = %file.name, path = %file.path.display(), "could not read setup: {}", err);
            SetupEntry::Unreadable { name: file.name.clone(), reason: err.to_string() }
        }
    }
}

impl SetupRegistry for SetupCatalog {
    fn entry(&self, name: &str) -> Option<&SetupEntry> {
        self.entries.get(name)
    }

    fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}
