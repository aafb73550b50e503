//! Validated names for setups and devices.

pub mod validation;

use crate::domain::AppError;
use crate::impl_validated_name;

/// A validated setup name (the file stem of a setup file).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetupName(String);

impl_validated_name!(SetupName, validation::validate_setup_name, AppError::InvalidSetupName);

/// A validated device name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceName(String);

impl_validated_name!(DeviceName, validation::validate_device_name, AppError::InvalidDeviceName);
