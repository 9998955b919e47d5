//! Go builder generation from struct models.

use super::naming::{RECEIVER, capitalize, param_name};
use anyhow::{Context, Result};
use fmgen_core::{FieldDescriptor, GENERATED_FILE_NAME, StructModel};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// First line of every generated file; Go tooling recognizes it.
pub const HEADER: &str = "// Code generated by fmgen. DO NOT EDIT.";

/// Render the generated file for one package.
///
/// Only imports whose package qualifier appears in an emitted field type are
/// kept; duplicates are dropped and the rest sorted.
pub fn render_file(package: &str, imports: &[String], structs: &[&StructModel]) -> String {
    let mut code = String::new();

    code.push_str(HEADER);
    code.push_str("\n\n");
    code.push_str(&format!("package {package}\n"));

    let imports = used_imports(imports, structs);
    if !imports.is_empty() {
        code.push_str("\nimport (\n");
        for import in &imports {
            code.push_str(&format!("\t{import}\n"));
        }
        code.push_str(")\n");
    }

    for model in structs {
        code.push('\n');
        code.push_str(&render_builder(model));
    }

    code
}

/// Render the builder type and functions for one struct.
pub fn render_builder(model: &StructModel) -> String {
    let name = &model.name;
    let builder = format!("{name}Builder");
    let mut code = String::new();

    let emitted: Vec<&FieldDescriptor> = model.fields.iter().filter(|f| !f.is_skipped).collect();
    let params = unique_params(&emitted);

    // Builder type
    code.push_str(&format!("// {builder} builds {name} values.\n"));
    code.push_str(&format!("type {builder} struct {{\n\tmodel {name}\n}}\n\n"));

    // Constructor with the required fields
    let required: Vec<(&FieldDescriptor, &String)> = emitted
        .iter()
        .zip(&params)
        .filter(|(f, _)| !f.is_optional)
        .map(|(f, p)| (*f, p))
        .collect();

    let signature = required
        .iter()
        .map(|(f, p)| format!("{p} {}", go_type(f)))
        .collect::<Vec<_>>()
        .join(", ");

    let constructor = format!("New{}Builder", capitalize(name));
    code.push_str(&format!(
        "// {constructor} returns a {builder} with the required fields set.\n"
    ));
    code.push_str(&format!(
        "func {constructor}({signature}) *{builder} {{\n"
    ));
    code.push_str(&format!("\t{RECEIVER} := &{builder}{{}}\n"));
    for (field, param) in &required {
        code.push_str(&format!("\t{RECEIVER}.model.{} = {param}\n", field.name));
    }
    code.push_str(&format!("\treturn {RECEIVER}\n}}\n"));

    // Setters for optional fields
    for (field, param) in emitted.iter().zip(&params).filter(|(f, _)| f.is_optional) {
        code.push_str(&format!("\n// With{0} sets {0}.\n", field.name));
        code.push_str(&format!(
            "func ({RECEIVER} *{builder}) With{}({param} {}) *{builder} {{\n",
            field.name,
            go_type(field)
        ));
        code.push_str(&format!("\t{RECEIVER}.model.{} = {param}\n", field.name));
        code.push_str(&format!("\treturn {RECEIVER}\n}}\n"));
    }

    // Build
    code.push_str(&format!("\n// Build returns the built {name}.\n"));
    code.push_str(&format!(
        "func ({RECEIVER} *{builder}) Build() {name} {{\n\treturn {RECEIVER}.model\n}}\n"
    ));

    code
}

/// Go spelling of a field's type: slice, then pointer, then base type.
pub fn go_type(field: &FieldDescriptor) -> String {
    let mut ty = String::new();
    if field.is_array {
        ty.push_str("[]");
    }
    if field.is_pointer {
        ty.push('*');
    }
    ty.push_str(&field.base_type);
    ty
}

/// Package qualifier an import spec is referenced by.
///
/// The alias of an aliased import, otherwise the last path element, skipping
/// a trailing major version (`/v2`).
pub fn import_qualifier(import: &str) -> &str {
    if let Some((alias, _)) = import.trim().split_once(char::is_whitespace) {
        return alias;
    }

    let path = import.trim_matches(|c| c == '"' || c == '`');
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);

    let is_version = last.len() > 1
        && last.starts_with('v')
        && last[1..].chars().all(|c| c.is_ascii_digit());
    if is_version {
        segments.next().unwrap_or(last)
    } else {
        last
    }
}

/// Write `content` to the generated file in `dir`, replacing any previous one.
pub fn write_generated(dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dir.join(GENERATED_FILE_NAME);
    fs::write(&path, content).with_context(|| format!("Failed to write {path:?}"))?;
    Ok(path)
}

fn used_imports(imports: &[String], structs: &[&StructModel]) -> Vec<String> {
    let qualifiers: HashSet<&str> = structs
        .iter()
        .flat_map(|s| s.fields.iter())
        .filter(|f| !f.is_skipped)
        .filter_map(|f| f.base_type.split_once('.').map(|(q, _)| q))
        .collect();

    let mut used: Vec<String> = imports
        .iter()
        .filter(|i| qualifiers.contains(import_qualifier(i)))
        .cloned()
        .collect();
    used.sort();
    used.dedup();
    used
}

/// Parameter names for the fields, suffixed with a counter on collision.
fn unique_params(fields: &[&FieldDescriptor]) -> Vec<String> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .map(|f| {
            let base = param_name(&f.name);
            let mut name = base.clone();
            let mut counter = 2;
            while !seen.insert(name.clone()) {
                name = format!("{base}{counter}");
                counter += 1;
            }
            name
        })
        .collect()
}
