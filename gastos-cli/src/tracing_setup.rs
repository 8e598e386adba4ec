//! Tracing setup for the gastos CLI
//!
//! Usage:
//!   gastos --debug serve               # Debug logging to console
//!   RUST_LOG=gastos_server=debug gastos serve
//!
//! Filter precedence: RUST_LOG, then --debug, then `[logging] level`
//! from the config file.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Force debug level unless RUST_LOG is set
    pub debug: bool,
    /// Filter used when neither RUST_LOG nor --debug apply
    pub default_level: String,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if self.debug {
                EnvFilter::new("debug")
            } else {
                EnvFilter::try_new(&self.default_level).unwrap_or_else(|_| EnvFilter::new("info"))
            }
        })
    }
}

/// Initialize console tracing on stderr, leaving stdout for command output.
/// Fails if a subscriber is already set.
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
