//! fmgen-logging - Tracing subscriber setup for the fmgen CLI
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr fmt subscriber as the global default
//! - [`level_filter`] / [`build_filter`] mapping [`LogLevel`] to tracing filters
//! - the [`ENV_VAR`] override for ad-hoc filter directives

mod filter;
mod subscriber;

pub use filter::{ENV_VAR, build_filter, level_filter};
pub use fmgen_core::LogLevel;
pub use subscriber::init_logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, init_logging};
}
