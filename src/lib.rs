//! labsetup: resolve declarative instrument setups into one flat device configuration.
//!
//! Setups are TOML or YAML files that declare devices, include and exclude
//! other setups, and carry start-up code and system configuration. The
//! [`SetupResolver`] walks the include graph of one or more requested setups
//! and produces a [`ResolvedConfiguration`].

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    SetupContext, check_setups, list_setups, load_context, resolve_setups, show_setup,
};
pub use app::commands::check::{CheckOptions, CheckOutcome, Diagnostic, Severity};
pub use app::commands::list::{DeviceSummary, SetupDetail, SetupSummary};
pub use app::commands::resolve::{OutputFormat, render};
pub use domain::AppError;
pub use domain::resolve::{
    ResolveOptions, ResolvedConfiguration, ResolvedDevice, SetupResolver, StartupBlock,
    UnresolvedReference,
};
pub use domain::setup::{Setup, SetupGroup};
