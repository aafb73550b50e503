use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::AppError;
use crate::domain::setup::SetupFormat;
use crate::ports::{SetupFile, SetupSource};

/// Setup files under one or more directory trees.
#[derive(Debug, Clone)]
pub struct FilesystemSetupSource {
    roots: Vec<PathBuf>,
}

impl FilesystemSetupSource {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl SetupSource for FilesystemSetupSource {
    /// Files root by root; within a root, subdirectories come before their parent.
    ///
    /// Symlinked setup files are read; symlinked directories are skipped.
    fn discover(&self) -> Result<Vec<SetupFile>, AppError> {
        let mut files = Vec::new();
        for root in &self.roots {
            if !root.is_dir() {
                return Err(AppError::SetupPathMissing(root.display().to_string()));
            }
            collect_bottom_up(root, &mut files)?;
        }
        debug!(count = files.len(), "discovered setup files");
        Ok(files)
    }

    fn read(&self, file: &SetupFile) -> Result<String, AppError> {
        Ok(fs::read_to_string(&file.path)?)
    }
}

fn collect_bottom_up(dir: &Path, files: &mut Vec<SetupFile>) -> Result<(), AppError> {
    let mut subdirs = Vec::new();
    let mut here = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = path.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }
        if path.is_dir() {
            // may point back into the tree
            if entry.file_type()?.is_symlink() {
                debug!(path = %path.display(), "skipping symlinked directory");
                continue;
            }
            subdirs.push(path);
        } else if let Some(format) = SetupFormat::from_path(&path) {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            here.push(SetupFile { name: name.to_string(), path: path.clone(), format });
        }
    }

    subdirs.sort();
    here.sort_by(|a, b| a.path.cmp(&b.path));

    for subdir in subdirs {
        collect_bottom_up(&subdir, files)?;
    }
    files.extend(here);
    Ok(())
}
