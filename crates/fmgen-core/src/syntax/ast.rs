//! Syntax tree for Go declarations

use super::Position;

/// An identifier with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub pos: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, pos: Position) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// A parsed Go source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub package: Ident,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
    /// Every comment group in the file, in source order
    pub comments: Vec<CommentGroup>,
}

/// One imported package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name: an alias, `.` or `_`
    pub name: Option<String>,
    /// Import path exactly as written, quotes included
    pub path: String,
    pub pos: Position,
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `type X ...` or a parenthesized group of type specs
    Type(Vec<TypeSpec>),
    /// Function or method; only the name is kept
    Func(FuncDecl),
    /// `var` or `const` declaration; contents are not modeled
    Value { kind: ValueKind, pos: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Var,
    Const,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: Ident,
    pub is_method: bool,
}

/// `Name [TypeParams] [=] Type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: Ident,
    pub has_type_params: bool,
    pub is_alias: bool,
    pub ty: TypeExpr,
}

/// Closed set of type expression shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `T`
    Named(Ident),
    /// `pkg.T`
    Qualified { package: Ident, name: Ident },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T` when `len` is `None`, otherwise `[len]T`
    Array {
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// `func(...) ...`; the signature is not modeled
    Func,
    /// `interface { ... }`; the method set is not modeled
    Interface,
    /// `struct { ... }`
    Struct(StructType),
    /// `T[A, B]`
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// `(T)`
    Paren(Box<TypeExpr>),
}

impl TypeExpr {
    /// Human-readable name of the expression's shape, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TypeExpr::Named(_) => "named type",
            TypeExpr::Qualified { .. } => "qualified type",
            TypeExpr::Pointer(_) => "pointer type",
            TypeExpr::Array { len: None, .. } => "slice type",
            TypeExpr::Array { .. } => "array type",
            TypeExpr::Map { .. } => "map type",
            TypeExpr::Chan { .. } => "channel type",
            TypeExpr::Func => "function type",
            TypeExpr::Interface => "interface type",
            TypeExpr::Struct(_) => "inline struct type",
            TypeExpr::Generic { .. } => "generic type instantiation",
            TypeExpr::Paren(_) => "parenthesized type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructType {
    pub fields: Vec<Field>,
}

/// One field declaration line: `A, B T "tag"` or an embedded `T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Empty for embedded fields
    pub names: Vec<Ident>,
    pub ty: TypeExpr,
    /// Tag literal exactly as written, quotes included
    pub tag: Option<String>,
    pub pos: Position,
}

/// A single `//` or `/* */` comment, markers included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub pos: Position,
    pub end_line: usize,
}

/// Adjacent comments with no tokens between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Line of the first comment in the group.
    pub fn line(&self) -> usize {
        self.list.first().map_or(0, |c| c.pos.line)
    }

    /// Last line covered by the group.
    pub fn end_line(&self) -> usize {
        self.list.last().map_or(0, |c| c.end_line)
    }

    /// Comment text with markers removed.
    ///
    /// The first space after `//` is dropped, trailing whitespace is trimmed,
    /// leading and trailing blank lines are removed and runs of blank lines
    /// collapse to one. Non-empty results end with a newline.
    pub fn text(&self) -> String {
        let mut lines: Vec<&str> = Vec::new();

        for comment in &self.list {
            let raw = comment.text.as_str();
            if let Some(body) = raw.strip_prefix("//") {
                lines.push(body.strip_prefix(' ').unwrap_or(body));
            } else {
                let body = raw
                    .strip_prefix("/*")
                    .and_then(|b| b.strip_suffix("*/"))
                    .unwrap_or(raw);
                lines.extend(body.split('\n'));
            }
        }

        let mut out: Vec<&str> = Vec::new();
        for line in lines {
            let line = line.trim_end();
            if line.is_empty() && out.last().is_none_or(|prev| prev.is_empty()) {
                continue;
            }
            out.push(line);
        }
        while out.last().is_some_and(|l| l.is_empty()) {
            out.pop();
        }

        if out.is_empty() {
            String::new()
        } else {
            let mut text = out.join("\n");
            text.push('\n');
            text
        }
    }
}
