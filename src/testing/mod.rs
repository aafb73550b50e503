pub mod domain;
pub mod ports;

#[allow(unused_imports)]
pub use domain::SetupBuilder;
#[allow(unused_imports)]
pub use ports::MemoryClassCatalog;
#[allow(unused_imports)]
pub use ports::MemorySetupRegistry;
#[allow(unused_imports)]
pub use ports::MemorySetupSource;
