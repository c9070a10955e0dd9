//! Logging infrastructure for docqa.
//!
//! Initializes the tracing subscriber with stderr output. Stdout is
//! reserved for the single JSON result document, so every diagnostic
//! line — service availability, chosen model, failure reasons — goes to
//! stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// The filter comes from `level` if given, otherwise from `RUST_LOG`,
/// otherwise defaults to `info`. Colored output is disabled when the
/// `NO_COLOR` environment variable is set.
pub fn init_logging(level: Option<&str>) -> AppResult<()> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = level.unwrap_or(&default_level);

    let env_filter = EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", filter_str, e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::env::var("NO_COLOR").is_err());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}
