//! Tracing subscriber setup for embedders

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install a global subscriber honouring `RUST_LOG`, defaulting to `info`.
///
/// Returns false when a subscriber was already installed.
pub fn init_logging() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
