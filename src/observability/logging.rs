//! # Logging
//!
//! Installs the global tracing subscriber.
//!
//! `RUST_LOG` wins when set; otherwise the configured log level applies to
//! this crate only. Output is plain text or one JSON object per line.

use crate::config::ValidatorConfig;
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set
fn default_directive(config: &ValidatorConfig) -> String {
    format!("dpa_validator={}", config.log_level.to_lowercase())
}

/// Install the global subscriber
pub fn init_tracing(config: &ValidatorConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(config)))
        .context("Failed to build log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.json_logs() {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.log_enable_color).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}
