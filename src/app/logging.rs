use tracing_subscriber::EnvFilter;

use super::config::DEFAULT_LOG_LEVEL;

/// Initialize the tracing subscriber with compact output on stderr.
///
/// `RUST_LOG` wins over `level`; an unparsable directive falls back to the default.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .try_init();
}
