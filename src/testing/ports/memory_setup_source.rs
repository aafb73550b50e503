//! In-memory setup source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::domain::setup::SetupFormat;
use crate::ports::{SetupFile, SetupSource};

/// Setup files held in memory, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySetupSource {
    files: Vec<SetupFile>,
    contents: BTreeMap<PathBuf, String>,
}

#[allow(dead_code)]
impl MemorySetupSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; format and setup name come from the path.
    pub fn file(mut self, path: &str, content: &str) -> Self {
        let path = PathBuf::from(path);
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        let format = SetupFormat::from_path(&path).unwrap_or(SetupFormat::Toml);
        self.contents.insert(path.clone(), content.to_string());
        self.files.push(SetupFile { name, path, format });
        self
    }

    /// Add a file that is listed but cannot be read.
    pub fn broken_file(mut self, path: &str) -> Self {
        let path = PathBuf::from(path);
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        self.files.push(SetupFile { name, path, format: SetupFormat::Toml });
        self
    }

    fn content(&self, path: &Path) -> Option<&String> {
        self.contents.get(path)
    }
}

impl SetupSource for MemorySetupSource {
    fn discover(&self) -> Result<Vec<SetupFile>, AppError> {
        Ok(self.files.clone())
    }

    fn read(&self, file: &SetupFile) -> Result<String, AppError> {
        self.content(&file.path).cloned().ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("cannot read {}", file.path.display()),
            ))
        })
    }
}
