//! Structured logging on stderr via `tracing`.
//!
//! Stdout is reserved for the dry-run listing and the start/end summary
//! lines, so every log event goes to stderr.

use tek_core::errors::{ErrorInfo, TekError};
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no level is given on the command line.
pub const LOG_ENV: &str = "TEK_LOG";

const DEFAULT_LEVEL: &str = "info";

/// Resolves the filter directive: CLI flag, then `TEK_LOG`, then `info`.
pub fn filter_directive(cli_level: Option<&str>) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LEVEL.to_string()),
    }
}

/// Installs the global subscriber.
pub fn init_logging(cli_level: Option<&str>) -> Result<(), TekError> {
    let directive = filter_directive(cli_level);
    let filter = EnvFilter::try_new(&directive).map_err(|err| {
        TekError::Config(
            ErrorInfo::new("log-filter", err.to_string())
                .with_context("directive", directive.clone()),
        )
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| TekError::Config(ErrorInfo::new("log-init", err.to_string())))
}
