use std::io;
use configs::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,sea_orm=warn,sqlx=warn";

fn env_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or(DEFAULT_FILTER)))
}

/// Initialize tracing from the logging section of the app config.
/// - Respects `RUST_LOG` if set, otherwise `logging.filter`, otherwise `info`
/// - Writes to stdout
/// - A second call is a no-op
pub fn init_logging(cfg: &LoggingConfig) {
    match cfg.format {
        LogFormat::Compact => init_logging_default_with(cfg.filter.as_deref()),
        LogFormat::Json => init_logging_json_with(cfg.filter.as_deref()),
    }
}

/// Compact human-readable output.
pub fn init_logging_default() {
    init_logging_default_with(None);
}

/// Structured JSON output for machine parsing.
pub fn init_logging_json() {
    init_logging_json_with(None);
}

fn init_logging_default_with(filter: Option<&str>) {
    let _ = fmt()
        .with_env_filter(env_filter(filter))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

fn init_logging_json_with(filter: Option<&str>) {
    let _ = fmt()
        .with_env_filter(env_filter(filter))
        .with_target(false)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// Route logs through the libtest capture so they show up only for failing tests.
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(env_filter(Some("debug,sea_orm=warn,sqlx=warn")))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_test_logging();
        init_logging(&LoggingConfig { format: LogFormat::Json, filter: Some("warn".into()) });
        init_logging_default();
    }
}
