use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn default_directive(verbosity: u8) -> &'static str {
    return match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
}

/// Logs go to stderr so they never mix with a response printed on stdout.
/// `RUST_LOG` takes precedence over `-v`.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    return tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("while installing the log subscriber: {}", e));
}
