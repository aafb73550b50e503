//! Setup registry port definition.

use crate::domain::AppError;
use crate::domain::setup::Setup;

/// A registry slot: either a parsed setup or the reason it could not be read.
#[derive(Debug, Clone)]
pub enum SetupEntry {
    Ready(Setup),
    Unreadable { name: String, reason: String },
}

impl SetupEntry {
    pub fn name(&self) -> &str {
        match self {
            SetupEntry::Ready(setup) => setup.name.as_str(),
            SetupEntry::Unreadable { name, .. } => name,
        }
    }

    pub fn setup(&self) -> Option<&Setup> {
        match self {
            SetupEntry::Ready(setup) => Some(setup),
            SetupEntry::Unreadable { .. } => None,
        }
    }
}

/// Read access to all known setups, keyed by name.
pub trait SetupRegistry {
    fn entry(&self, name: &str) -> Option<&SetupEntry>;

    /// All setup names, sorted.
    fn names(&self) -> Vec<&str>;

    fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// All readable setups, sorted by name.
    fn setups(&self) -> Vec<&Setup> {
        self.names().into_iter().filter_map(|name| self.entry(name)?.setup()).collect()
    }

    /// Look up a readable setup.
    ///
    /// `included_by` names the setup whose include is being followed, for the
    /// error message.
    fn lookup(&self, name: &str, included_by: Option<&str>) -> Result<&Setup, AppError> {
        match self.entry(name) {
            Some(SetupEntry::Ready(setup)) => Ok(setup),
            Some(SetupEntry::Unreadable { reason, .. }) => Err(AppError::UnreadableSetup {
                name: name.to_string(),
                reason: reason.clone(),
            }),
            None => Err(AppError::SetupNotFound {
                name: name.to_string(),
                included_by: included_by.map(str::to_string),
                available: if included_by.is_some() {
                    String::new()
                } else {
                    self.names().join(", ")
                },
            }),
        }
    }
}
