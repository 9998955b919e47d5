//! Field type resolution
//!
//! Flattens a field's type expression into a [`FieldDescriptor`]: pointer and
//! array wrappers are peeled off until a named or qualified type remains.

use crate::directive::Directives;
use crate::model::FieldDescriptor;
use crate::syntax::TypeExpr;
use thiserror::Error;

/// A field whose type has a shape other than named, qualified, pointer or array
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported type for field [{field}]: {shape}")]
pub struct UnsupportedType {
    pub field: String,
    pub shape: &'static str,
}

#[derive(Default)]
struct Wrappers {
    pointer: bool,
    array: bool,
}

/// Build the descriptor for one field.
///
/// `tag` is the raw tag literal, if any; its `fmgen` directives set the
/// optional and skip flags.
pub fn resolve_field(
    name: &str,
    ty: &TypeExpr,
    tag: Option<&str>,
) -> Result<FieldDescriptor, UnsupportedType> {
    let mut wrappers = Wrappers::default();
    let base_type = unwrap_type(ty, &mut wrappers).map_err(|shape| UnsupportedType {
        field: name.to_string(),
        shape,
    })?;

    let directives = tag.and_then(Directives::parse).unwrap_or_default();

    Ok(FieldDescriptor {
        name: name.to_string(),
        base_type,
        is_pointer: wrappers.pointer,
        is_array: wrappers.array,
        is_optional: directives.is_optional(),
        is_skipped: directives.is_skip(),
    })
}

fn unwrap_type(ty: &TypeExpr, wrappers: &mut Wrappers) -> Result<String, &'static str> {
    match ty {
        TypeExpr::Named(ident) => Ok(ident.name.clone()),
        TypeExpr::Qualified { package, name } => Ok(format!("{}.{}", package.name, name.name)),
        TypeExpr::Pointer(inner) => {
            wrappers.pointer = true;
            unwrap_type(inner, wrappers)
        }
        TypeExpr::Array { elem, .. } => {
            wrappers.array = true;
            unwrap_type(elem, wrappers)
        }
        TypeExpr::Map { .. }
        | TypeExpr::Chan { .. }
        | TypeExpr::Func
        | TypeExpr::Interface
        | TypeExpr::Struct(_)
        | TypeExpr::Generic { .. }
        | TypeExpr::Paren(_) => Err(ty.describe()),
    }
}
