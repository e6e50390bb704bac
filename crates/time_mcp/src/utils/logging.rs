use tracing_subscriber::{EnvFilter, prelude::*};

use crate::core::error::{TimeServerError, TimeServerResult};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialize logging to stderr
///
/// # Environment Variables
/// - `RUST_LOG`: Full filter directives, takes precedence
/// - `LOG_LEVEL`: Plain level used when `RUST_LOG` is unset
///
/// Falls back to `info` when neither is set. Stdout is left untouched because
/// the stdio transport writes protocol frames there.
pub fn init_logging() -> TimeServerResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        EnvFilter::new(level)
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| TimeServerError::LoggingInitialization(e.to_string()))?;

    Ok(())
}
