pub mod device;
pub mod error;
pub mod identifiers;
pub mod resolve;
pub mod setup;
pub mod value;

pub use error::AppError;
pub use identifiers::{DeviceName, SetupName};
pub use value::{Limits, ParamValue};
