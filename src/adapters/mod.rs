pub mod assets;
pub mod setup_catalog;
pub mod setup_filesystem;

pub use assets::device_class_catalog_embedded::EmbeddedDeviceClassCatalog;
pub use setup_catalog::SetupCatalog;
pub use setup_filesystem::FilesystemSetupSource;
