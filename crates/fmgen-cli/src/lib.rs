//! fmgen-cli - Builder code generator for Go structs
//!
//! Library half of the `fmgen` binary:
//! - [`source`] locating directories and parsing Go files
//! - [`config`] `fmgen.toml` settings and command-line overrides
//! - [`codegen`] rendering and writing the generated Go file
//! - [`generate`] the generate and inspect drivers

pub mod codegen;
pub mod config;
pub mod generate;
pub mod source;

pub use config::{Overrides, Settings};
pub use generate::{GenerateOptions, Summary, Target};
