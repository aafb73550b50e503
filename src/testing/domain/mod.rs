mod setup_builder;

pub use self::setup_builder::SetupBuilder;
