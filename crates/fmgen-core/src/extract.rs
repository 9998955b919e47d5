//! Struct extraction
//!
//! Walks a parsed [`SourceFile`] and builds the struct model: one
//! [`StructModel`] per struct type declaration, with field descriptors from
//! [`resolve_field`] and the comment found directly above the declaration.

use crate::dump;
use crate::error::{ExtractError, ExtractResult};
use crate::model::{Comment, FieldDescriptor, FileModel, PackageModel, StructModel};
use crate::resolve::resolve_field;
use crate::syntax::{Decl, Field, SourceFile, StructType, TypeExpr, TypeSpec};
use std::path::Path;
use tracing::{debug, info};

/// Extraction settings threaded in by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Emit comment, struct and import dumps as debug events
    pub verbose: bool,
}

impl ExtractOptions {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

/// The first comment that starts on the line directly above `line`.
pub fn find_comment(line: usize, comments: &[Comment]) -> Option<&Comment> {
    comments.iter().find(|c| c.line + 1 == line)
}

/// Import specs of a file as written, in declaration order.
///
/// A plain import is its quoted path; an aliased one keeps the local name in
/// front, as in `t "time"`.
pub fn extract_imports(file: &SourceFile, options: &ExtractOptions) -> Vec<String> {
    let imports: Vec<String> = file
        .imports
        .iter()
        .map(|i| match &i.name {
            Some(name) => format!("{name} {}", i.path),
            None => i.path.clone(),
        })
        .collect();

    if options.verbose {
        debug!("\n{}", dump::render(imports.as_slice(), dump::write_imports));
    }

    imports
}

/// Struct models of a file in declaration order.
///
/// Type declarations that are not plain structs are skipped with a notice.
/// A field whose type cannot be flattened aborts extraction of the whole file.
pub fn extract_structs(
    file: &SourceFile,
    options: &ExtractOptions,
) -> ExtractResult<Vec<StructModel>> {
    let comments = collect_comments(file);
    if options.verbose {
        debug!("\n{}", dump::render(comments.as_slice(), dump::write_comments));
    }

    let mut structs = Vec::new();
    for decl in &file.decls {
        let Decl::Type(specs) = decl else {
            continue;
        };
        for spec in specs {
            match struct_body(spec) {
                Some(body) => structs.push(build_struct(spec, body, &comments)?),
                None => info!(
                    package = %file.package.name,
                    name = %spec.name.name,
                    "skipping {} declaration",
                    spec_kind(spec)
                ),
            }
        }
    }

    if options.verbose {
        debug!("\n{}", dump::render(structs.as_slice(), dump::write_structs));
    }

    Ok(structs)
}

/// Build the model of one source file.
pub fn extract_file(
    path: &Path,
    file: &SourceFile,
    options: &ExtractOptions,
) -> ExtractResult<FileModel> {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let structs = extract_structs(file, options)?;
    let imports = extract_imports(file, options);

    Ok(FileModel {
        dir,
        file_name,
        package: file.package.name.clone(),
        structs,
        imports,
    })
}

/// Build the models of one directory's files.
///
/// Files are taken in the given order and grouped by package name; packages
/// appear in the order they are first seen.
pub fn extract_package(
    dir: &Path,
    files: &[(String, SourceFile)],
    options: &ExtractOptions,
) -> ExtractResult<Vec<PackageModel>> {
    let mut packages: Vec<PackageModel> = Vec::new();

    for (file_name, file) in files {
        let model = extract_file(&dir.join(file_name), file, options)?;

        match packages.iter_mut().find(|p| p.package == model.package) {
            Some(package) => {
                package.structs.extend(model.structs);
                package.imports.extend(model.imports);
            }
            None => packages.push(PackageModel::from(model)),
        }
    }

    Ok(packages)
}

fn collect_comments(file: &SourceFile) -> Vec<Comment> {
    file.comments
        .iter()
        .map(|group| Comment {
            line: group.line(),
            text: group.text(),
        })
        .collect()
}

fn struct_body(spec: &TypeSpec) -> Option<&StructType> {
    match &spec.ty {
        TypeExpr::Struct(body) if !spec.has_type_params && !spec.is_alias => Some(body),
        _ => None,
    }
}

fn spec_kind(spec: &TypeSpec) -> &'static str {
    if spec.has_type_params {
        "generic type"
    } else if spec.is_alias {
        "alias"
    } else {
        spec.ty.describe()
    }
}

fn build_struct(
    spec: &TypeSpec,
    body: &StructType,
    comments: &[Comment],
) -> ExtractResult<StructModel> {
    let name = spec.name.name.clone();
    let line = spec.name.pos.line;

    let mut fields = Vec::with_capacity(body.fields.len());
    for field in &body.fields {
        fields.extend(build_fields(&name, field)?);
    }

    Ok(StructModel {
        name,
        line,
        fields,
        comment: find_comment(line, comments).cloned(),
    })
}

/// One descriptor per declared name; embedded fields take the type's name.
fn build_fields(structure: &str, field: &Field) -> ExtractResult<Vec<FieldDescriptor>> {
    let names: Vec<&str> = if field.names.is_empty() {
        vec![embedded_name(&field.ty)]
    } else {
        field.names.iter().map(|n| n.name.as_str()).collect()
    };

    names
        .into_iter()
        .map(|name| {
            resolve_field(name, &field.ty, field.tag.as_deref()).map_err(|err| {
                ExtractError::UnsupportedFieldType {
                    structure: structure.to_string(),
                    field: err.field,
                    line: field.pos.line,
                    shape: err.shape.to_string(),
                }
            })
        })
        .collect()
}

fn embedded_name(ty: &TypeExpr) -> &str {
    match ty {
        TypeExpr::Named(ident) => &ident.name,
        TypeExpr::Qualified { name, .. } => &name.name,
        TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) => embedded_name(inner),
        TypeExpr::Generic { base, .. } => embedded_name(base),
        _ => "",
    }
}

#[cfg(test)]
#[path = "extract/extract_tests.rs"]
mod extract_tests;
