mod device_class_catalog;
mod setup_registry;
mod setup_source;

pub use device_class_catalog::DeviceClassCatalog;
pub use setup_registry::{SetupEntry, SetupRegistry};
pub use setup_source::{SetupFile, SetupSource};
