//! Language-agnostic struct model produced by extraction

use serde::Serialize;
use std::path::PathBuf;

/// One struct field after type unwrapping and directive parsing.
///
/// `is_pointer` and `is_array` only record that the declared type passed
/// through that wrapper at least once; `base_type` is the innermost named or
/// qualified (`pkg.Type`) type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub base_type: String,
    pub is_pointer: bool,
    pub is_array: bool,
    pub is_optional: bool,
    pub is_skipped: bool,
}

/// A comment group's text and the line it starts on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub line: usize,
    pub text: String,
}

/// A struct type declaration.
///
/// `fields` keeps source declaration order; generated code depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructModel {
    pub name: String,
    pub line: usize,
    pub fields: Vec<FieldDescriptor>,
    /// The comment starting exactly one line above the declaration
    pub comment: Option<Comment>,
}

/// Structs and imports of a single source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileModel {
    pub dir: PathBuf,
    pub file_name: String,
    pub package: String,
    pub structs: Vec<StructModel>,
    /// Import paths as written, quotes included
    pub imports: Vec<String>,
}

/// Structs and imports of one package within a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageModel {
    pub dir: PathBuf,
    pub package: String,
    pub structs: Vec<StructModel>,
    pub imports: Vec<String>,
}

impl From<FileModel> for PackageModel {
    fn from(file: FileModel) -> Self {
        Self {
            dir: file.dir,
            package: file.package,
            structs: file.structs,
            imports: file.imports,
        }
    }
}
