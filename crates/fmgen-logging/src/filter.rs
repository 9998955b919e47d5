//! Level filters

use fmgen_core::LogLevel;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding filter directives that replace the level
pub const ENV_VAR: &str = "FMGEN_LOG";

/// Convert LogLevel to tracing LevelFilter
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}

/// Build the subscriber filter.
///
/// Directives from `env_override` win when present and valid; otherwise every
/// target is filtered at `level`.
pub fn build_filter(level: LogLevel, env_override: Option<&str>) -> EnvFilter {
    let fallback = || {
        EnvFilter::builder()
            .with_default_directive(level_filter(level).into())
            .parse_lossy("")
    };

    match env_override.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| fallback()),
        None => fallback(),
    }
}
