//! API facade for the application.
//!
//! Builds the filesystem-backed context from a list of setup roots and runs
//! commands against it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::{EmbeddedDeviceClassCatalog, FilesystemSetupSource, SetupCatalog};
use crate::app::AppContext;
use crate::app::commands::check::{self, CheckOptions, CheckOutcome};
use crate::app::commands::list::{self, SetupDetail, SetupSummary};
use crate::app::commands::resolve;
use crate::domain::AppError;
use crate::domain::resolve::{ResolveOptions, ResolvedConfiguration};
use crate::domain::setup::SetupGroup;

/// Context backed by setup directories and the embedded class catalog.
pub type SetupContext = AppContext<SetupCatalog, EmbeddedDeviceClassCatalog>;

/// Read all setups below `roots`.
pub fn load_context<P: AsRef<Path>>(roots: &[P]) -> Result<SetupContext, AppError> {
    let roots: Vec<PathBuf> = roots.iter().map(|p| p.as_ref().to_path_buf()).collect();
    let source = FilesystemSetupSource::new(roots);
    let catalog = SetupCatalog::load(&source)?;
    let classes = EmbeddedDeviceClassCatalog::new()?;
    debug!(setups = catalog.len(), classes = classes.len(), "setup catalog loaded");
    Ok(AppContext::new(catalog, classes))
}

/// Resolve one or more setups found below `roots`.
pub fn resolve_setups<P, S>(
    roots: &[P],
    names: &[S],
    options: ResolveOptions,
) -> Result<ResolvedConfiguration, AppError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let ctx = load_context(roots)?;
    resolve::execute(&ctx, names, options)
}

/// Summaries of the setups below `roots`.
pub fn list_setups<P: AsRef<Path>>(
    roots: &[P],
    group: Option<SetupGroup>,
) -> Result<Vec<SetupSummary>, AppError> {
    let ctx = load_context(roots)?;
    Ok(list::list(&ctx, group))
}

/// Details of one setup below `roots`.
pub fn show_setup<P: AsRef<Path>>(roots: &[P], name: &str) -> Result<SetupDetail, AppError> {
    let ctx = load_context(roots)?;
    list::show(&ctx, name)
}

/// Check every setup below `roots`, printing findings to stderr.
pub fn check_setups<P: AsRef<Path>>(
    roots: &[P],
    options: CheckOptions,
) -> Result<CheckOutcome, AppError> {
    let ctx = load_context(roots)?;
    Ok(check::execute(&ctx, options))
}
