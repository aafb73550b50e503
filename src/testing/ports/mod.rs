mod memory_class_catalog;
mod memory_setup_registry;
mod memory_setup_source;

pub use self::memory_class_catalog::MemoryClassCatalog;
pub use self::memory_setup_registry::MemorySetupRegistry;
pub use self::memory_setup_source::MemorySetupSource;
