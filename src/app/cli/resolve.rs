use tracing::warn;

use crate::app::api::load_context;
use crate::app::commands::resolve::{self, OutputFormat};
use crate::app::config::Settings;
use crate::domain::AppError;
use crate::domain::resolve::ResolveOptions;

pub fn run_resolve(
    settings: &Settings,
    setups: &[String],
    format: OutputFormat,
    options: ResolveOptions,
) -> Result<(), AppError> {
    let ctx = load_context(settings.setup_paths.as_slice())?;
    let config = resolve::execute(&ctx, setups, options)?;

    let unresolved = config.unresolved_references();
    if !unresolved.is_empty() {
        warn!(count = unresolved.len(), "configuration has dangling device references");
    }

    let rendered = resolve::render(&config, format)?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
