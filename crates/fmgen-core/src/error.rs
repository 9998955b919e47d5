//! Error types for struct extraction

use crate::syntax::SyntaxError;
use thiserror::Error;

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Fatal conditions raised while turning Go source into struct models.
///
/// Declarations that are not structs, tags without an `fmgen` key and structs
/// without a doc comment are normal outcomes and never surface here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The source text could not be parsed
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A field's type expression has a shape the resolver cannot flatten
    #[error("unsupported type for field [{field}] in struct [{structure}] at line {line}: {shape}")]
    UnsupportedFieldType {
        structure: String,
        field: String,
        line: usize,
        shape: String,
    },
}
