//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Upstream client crates are noisy at debug; cap them unless RUST_LOG says otherwise.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,h2=warn,rustls=warn";

#[must_use]
pub fn filter_directives(level: &str) -> String {
    format!("{level},{QUIET_DEPENDENCIES}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the config.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
