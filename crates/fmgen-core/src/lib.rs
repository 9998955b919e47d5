//! fmgen-core - Go struct extraction and generation policy
//!
//! This crate turns Go source into a language-agnostic struct model and
//! decides which structs get generated code:
//! - [`syntax`] declaration-level Go parser (the syntax tree the core consumes)
//! - [`Directives`] parsing of `fmgen:"..."` field tags
//! - [`resolve_field`] unwrapping of pointer/array type wrappers
//! - [`extract_file`] / [`extract_package`] building [`FileModel`] and [`PackageModel`]
//! - [`policy`] deciding which [`StructModel`]s are eligible for generation
//!
//! Everything here is a pure computation over already-read source text.

pub mod dump;
pub mod policy;
pub mod syntax;

mod directive;
mod error;
mod extract;
mod model;
mod resolve;

pub use directive::{Directives, TAG_KEY};
pub use error::{ExtractError, ExtractResult};
pub use extract::{
    ExtractOptions, extract_file, extract_imports, extract_package, extract_structs, find_comment,
};
pub use model::{Comment, FieldDescriptor, FileModel, PackageModel, StructModel};
pub use policy::{AllowList, Decision, ExclusionReason};
pub use resolve::{UnsupportedType, resolve_field};

/// Name of the generated file written into each processed directory.
pub const GENERATED_FILE_NAME: &str = "fm_gen.go";

/// Log levels understood by the CLI and the logging crate
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Parse a level name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            "off" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AllowList, Decision, ExtractError, ExtractOptions, ExtractResult, FieldDescriptor,
        FileModel, LogLevel, PackageModel, StructModel, extract_file, extract_package,
    };
}
