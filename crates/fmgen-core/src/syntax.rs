//! Declaration-level Go parser.
//!
//! Produces the [`SourceFile`] tree the extractor consumes: the package
//! clause, imports, type declarations with full struct and type-expression
//! detail, and comment groups with line numbers. Function bodies and
//! `var`/`const` initializers are skipped by bracket balancing; nothing below
//! the declaration level is modeled.
//!
//! ```
//! use fmgen_core::syntax::{Decl, TypeExpr, parse_source};
//!
//! let file = parse_source("package demo\n\ntype Point struct {\n\tX, Y int\n}\n").unwrap();
//! assert_eq!(file.package.name, "demo");
//! let Decl::Type(specs) = &file.decls[0] else { panic!("expected type decl") };
//! assert!(matches!(specs[0].ty, TypeExpr::Struct(_)));
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::{
    ChanDir, Comment, CommentGroup, Decl, Field, FuncDecl, Ident, ImportSpec, SourceFile,
    StructType, TypeExpr, TypeSpec, ValueKind,
};
pub use lexer::{Keyword, Lexed, Lexer, Token, TokenKind};
pub use parser::Parser;

use std::fmt;
use thiserror::Error;

/// 1-based line/column location in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lexing or parsing failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at line {}, column {}: {message}", position.line, position.column)]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Parse a complete Go source file.
pub fn parse_source(source: &str) -> Result<SourceFile, SyntaxError> {
    Parser::new(source)?.parse_file()
}
