//! Setup group classification.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::AppError;

/// Category of a setup; controls whether and how it may be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupGroup {
    /// Main instrument setups, usually mutually exclusive.
    Basic,
    /// Additional setups loaded on demand.
    #[default]
    Optional,
    /// Building blocks meant to be included by other setups.
    Lowlevel,
    /// Setups for services (monitors, pollers, daemons).
    Special,
    /// Data-only setups that are never loaded.
    Configdata,
    /// Sample environment announced at runtime.
    Plugplay,
}

impl SetupGroup {
    pub const ALL: [SetupGroup; 6] = [
        SetupGroup::Basic,
        SetupGroup::Optional,
        SetupGroup::Lowlevel,
        SetupGroup::Special,
        SetupGroup::Configdata,
        SetupGroup::Plugplay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SetupGroup::Basic => "basic",
            SetupGroup::Optional => "optional",
            SetupGroup::Lowlevel => "lowlevel",
            SetupGroup::Special => "special",
            SetupGroup::Configdata => "configdata",
            SetupGroup::Plugplay => "plugplay",
        }
    }

    /// Whether a resolver may activate a setup of this group.
    pub fn is_loadable(&self, allow_special: bool) -> bool {
        match self {
            SetupGroup::Configdata => false,
            SetupGroup::Special => allow_special,
            _ => true,
        }
    }

    /// Comma-separated list of valid group names for messages.
    pub fn valid_names() -> String {
        Self::ALL.iter().map(|g| g.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for SetupGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|g| g.as_str() == s).ok_or_else(|| {
            AppError::config_error(format!(
                "Invalid setup group '{}' (valid groups are: {})",
                s,
                Self::valid_names()
            ))
        })
    }
}

impl fmt::Display for SetupGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
