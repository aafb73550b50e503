//! Setup resolution: include/exclude traversal and the resolved configuration.

pub mod resolved;
pub mod resolver;

pub use resolved::{ResolvedConfiguration, ResolvedDevice, StartupBlock, UnresolvedReference};
pub use resolver::{ResolveOptions, SYSTEM_SETUP, SetupResolver};
