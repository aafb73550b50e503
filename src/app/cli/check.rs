//! Check command implementation.

use crate::app::api::check_setups;
use crate::app::commands::check::CheckOptions;
use crate::app::config::Settings;
use crate::domain::AppError;

pub fn run_check(settings: &Settings, strict: bool) -> Result<i32, AppError> {
    let outcome = check_setups(settings.setup_paths.as_slice(), CheckOptions { strict })?;
    Ok(outcome.exit_code)
}
