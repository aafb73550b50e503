//! Device class catalog port definition.

use crate::domain::device::DeviceClass;

/// Trait for accessing device class schemas.
pub trait DeviceClassCatalog {
    /// Get a class by its fully qualified name.
    fn get(&self, name: &str) -> Option<&DeviceClass>;

    /// List all classes sorted by name.
    fn list_all(&self) -> Vec<&DeviceClass>;
}
