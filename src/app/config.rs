//! Tool configuration: `labsetup.toml`, environment and command-line overrides.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::resolve::ResolveOptions;

/// Config file looked up in the current directory when `--config` is absent.
pub const CONFIG_FILE: &str = "labsetup.toml";
/// OS path list of setup roots, overriding `setups.paths`.
pub const SETUP_PATH_ENV: &str = "LABSETUP_SETUP_PATH";
/// Log filter used when neither `RUST_LOG` nor `log.level` is set.
pub const LOG_ENV: &str = "LABSETUP_LOG";
/// Log filter used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Contents of `labsetup.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub setups: SetupsSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupsSection {
    /// Setup roots, relative to the config file.
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    #[serde(default)]
    pub autoload_system: bool,
    #[serde(default)]
    pub allow_special: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default)]
    pub level: Option<String>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub setup_paths: Vec<PathBuf>,
}

/// Effective settings after all sources have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub setup_paths: Vec<PathBuf>,
    pub options: ResolveOptions,
    /// Filter directive for the log subscriber; `RUST_LOG` still wins over it.
    pub log_level: String,
}

/// Parse `labsetup.toml` content.
pub fn parse_config_content(content: &str) -> Result<ConfigFile, AppError> {
    let config: ConfigFile = toml::from_str(content)?;
    Ok(config)
}

/// Build the settings for a run started in `cwd`.
pub fn load_settings(overrides: &ConfigOverrides, cwd: &Path) -> Result<Settings, AppError> {
    let config_path = match &overrides.config {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => Some(cwd.join(CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let (file, base) = match config_path {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let file = parse_config_content(&content).map_err(|err| {
                AppError::config_error(format!("Invalid config {}: {}", path.display(), err))
            })?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
            (file, base)
        }
        None => (ConfigFile::default(), cwd.to_path_buf()),
    };

    let setup_paths = if !overrides.setup_paths.is_empty() {
        overrides.setup_paths.iter().map(|p| cwd.join(p)).collect()
    } else if let Some(paths) = env::var_os(SETUP_PATH_ENV).filter(|v| !v.is_empty()) {
        split_path_list(&paths).into_iter().map(|p| cwd.join(p)).collect()
    } else {
        file.setups.paths.iter().map(|p| base.join(p)).collect::<Vec<_>>()
    };
    if setup_paths.is_empty() {
        return Err(AppError::config_error(format!(
            "No setup path configured: pass --setup-path, set {} or add setups.paths to {}",
            SETUP_PATH_ENV, CONFIG_FILE
        )));
    }

    let log_level = file
        .log
        .level
        .or_else(|| env::var(LOG_ENV).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    Ok(Settings {
        setup_paths,
        options: ResolveOptions {
            allow_special: file.setups.allow_special,
            autoload_system: file.setups.autoload_system,
        },
        log_level,
    })
}

fn split_path_list(value: &OsString) -> Vec<PathBuf> {
    env::split_paths(value).filter(|p| !p.as_os_str().is_empty()).collect()
}
