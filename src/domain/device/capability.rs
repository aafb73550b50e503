//! Capability interfaces over typed device specs.

use std::time::Duration;

use crate::domain::Limits;

/// Format string used when a readable device does not configure one.
pub const DEFAULT_FMTSTR: &str = "%.3f";

/// A device that reports a value.
pub trait Readable {
    fn unit(&self) -> Option<&str>;

    fn fmtstr(&self) -> &str;

    fn poll_interval(&self) -> Option<Duration>;

    fn max_age(&self) -> Option<Duration>;

    fn warn_limits(&self) -> Option<Limits>;
}

/// A device that can be driven to a numeric target.
pub trait Moveable: Readable {
    fn abs_limits(&self) -> Option<Limits>;

    fn user_limits(&self) -> Option<Limits>;

    /// User limits if configured, else absolute limits.
    fn effective_limits(&self) -> Option<Limits> {
        self.user_limits().or_else(|| self.abs_limits())
    }

    /// Check a target against the effective limits.
    fn check_target(&self, target: f64) -> Result<(), String> {
        match self.effective_limits() {
            Some(limits) if !limits.contains(target) => {
                Err(format!("target {} is outside the limits {}", target, limits))
            }
            _ => Ok(()),
        }
    }
}

/// A device with a fixed set of named states.
pub trait Switchable: Readable {
    fn states(&self) -> &[String];

    fn has_state(&self, state: &str) -> bool {
        self.states().iter().any(|s| s == state)
    }
}
