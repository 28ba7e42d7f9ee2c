//! Tracing setup for the commentbox CLI
//!
//! Usage:
//!   commentbox --debug ...                 # Debug logging to stderr
//!   RUST_LOG=commentbox_core=debug ...     # Fine-grained log control
//!
//! Logs go to stderr so `--json` output on stdout stays pipeable.
//!
//! Without `--debug` or RUST_LOG only `error` events are shown. Failed
//! requests are already reported once through the command's own error, so
//! the library's `warn` events stay quiet by default.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Debug level unless RUST_LOG is set
    pub debug: bool,
}

/// Filter used when RUST_LOG is unset
fn default_directive(config: &TracingConfig) -> &'static str {
    if config.debug {
        "debug"
    } else {
        "error"
    }
}

/// Initialize console tracing on stderr
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
