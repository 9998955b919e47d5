//! Global subscriber installation

use crate::filter::{ENV_VAR, build_filter};
use fmgen_core::LogLevel;
use tracing_subscriber::prelude::*;

/// Initialize logging for the CLI
///
/// Installs a compact fmt layer writing to stderr, filtered at `level` unless
/// `FMGEN_LOG` supplies directives. Returns `false` when a global subscriber
/// was already set, in which case the existing one stays in place.
pub fn init_logging(level: LogLevel) -> bool {
    let env_override = std::env::var(ENV_VAR).ok();
    let filter = build_filter(level, env_override.as_deref());

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry().with(layer).with(filter);

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
