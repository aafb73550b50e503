//! Setup source port definition.

use std::path::PathBuf;

use crate::domain::AppError;
use crate::domain::setup::SetupFormat;

/// A setup file found by a [`SetupSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFile {
    /// File stem; not validated yet.
    pub name: String,
    pub path: PathBuf,
    pub format: SetupFormat,
}

/// Where setup files come from.
pub trait SetupSource {
    /// All setup files in load order.
    ///
    /// Later files with the same name extend earlier ones.
    fn discover(&self) -> Result<Vec<SetupFile>, AppError>;

    /// Read the content of a discovered file.
    fn read(&self, file: &SetupFile) -> Result<String, AppError>;
}
