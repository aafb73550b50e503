use crate::ports::{DeviceClassCatalog, SetupRegistry};

/// Application context holding dependencies for command execution.
pub struct AppContext<R: SetupRegistry, C: DeviceClassCatalog> {
    setups: R,
    classes: C,
}

impl<R: SetupRegistry, C: DeviceClassCatalog> AppContext<R, C> {
    pub fn new(setups: R, classes: C) -> Self {
        Self { setups, classes }
    }

    /// Get a reference to the setup registry.
    pub fn setups(&self) -> &R {
        &self.setups
    }

    /// Get a reference to the device class catalog.
    pub fn classes(&self) -> &C {
        &self.classes
    }
}
