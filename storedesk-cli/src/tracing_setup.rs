//! Tracing setup for the storedesk CLI
//!
//! Usage:
//!   storedesk --debug serve              # Debug logging to console
//!   RUST_LOG=storedesk_server=debug ...  # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Default to debug level when RUST_LOG is unset
    pub debug: bool,
}

fn filter(config: &TracingConfig) -> EnvFilter {
    let default = if config.debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize console tracing. RUST_LOG always wins over `--debug`.
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
