//! Shared testing utilities for labsetup integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory and setup tree.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Path to the directory used as the current directory for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Root of the scratch setup tree written by [`TestContext::write_setup`].
    pub fn setups_dir(&self) -> PathBuf {
        self.work_dir.join("setups")
    }

    /// Write a setup file below the scratch setup tree.
    pub fn write_setup(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.setups_dir().join(relative);
        fs::create_dir_all(path.parent().expect("setup path has a parent"))
            .expect("Failed to create setup directory");
        fs::write(&path, content).expect("Failed to write setup file");
        path
    }

    /// Write `labsetup.toml` into the working directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("labsetup.toml");
        fs::write(&path, content).expect("Failed to write config file");
        path
    }

    /// Build a command for invoking the compiled `labsetup` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("labsetup").expect("Failed to locate labsetup binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("RUST_LOG")
            .env_remove("LABSETUP_LOG")
            .env_remove("LABSETUP_SETUP_PATH");
        cmd
    }
}

/// Checked-in instrument setups.
#[allow(dead_code)]
pub fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/setups")
}

/// The TOFTOF instrument tree.
#[allow(dead_code)]
pub fn toftof_setups() -> PathBuf {
    fixtures().join("toftof")
}

/// Setups shared between instruments.
#[allow(dead_code)]
pub fn common_setups() -> PathBuf {
    fixtures().join("common")
}
