//! Setup domain: the setup record, its file format, and merge rules.

pub mod alias;
pub mod group;
pub mod interpolate;
pub mod model;
pub mod parse;
pub mod sysconfig;

pub use alias::{AliasTable, AliasTarget};
pub use group::SetupGroup;
pub use model::{DEFAULT_DISPLAY_ORDER, ExplicitKeys, Setup};
pub use parse::{SetupFormat, parse_setup};
pub use sysconfig::{EXPERIMENT_DEVICE, SysConfig};
