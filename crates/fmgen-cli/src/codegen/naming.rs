//! Naming convention utilities for generated Go code.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `LastUpdated` | [`to_lower_camel`] | `lastUpdated` |
//! | `name` | [`capitalize`] | `Name` |
//! | `type` | [`escape_identifier`] | `type_` |

/// Go keywords, which cannot be used as parameter names.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Receiver name used by generated builder methods.
pub const RECEIVER: &str = "b";

/// Convert an exported Go identifier to lowerCamelCase.
///
/// A leading acronym is lowered as a whole, keeping the capital that starts
/// the next word.
///
/// # Examples
///
/// ```
/// use fmgen_cli::codegen::naming::to_lower_camel;
///
/// assert_eq!(to_lower_camel("LastUpdated"), "lastUpdated");
/// assert_eq!(to_lower_camel("ID"), "id");
/// assert_eq!(to_lower_camel("URLPath"), "urlPath");
/// assert_eq!(to_lower_camel("name"), "name");
/// ```
pub fn to_lower_camel(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let upper_run = chars.iter().take_while(|c| c.is_uppercase()).count();

    let lowered = match upper_run {
        0 => return s.to_string(),
        n if n == chars.len() => n,
        1 => 1,
        n if chars[n].is_alphabetic() => n - 1,
        n => n,
    };

    chars
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            if i < lowered {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                vec![*c]
            }
        })
        .collect()
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use fmgen_cli::codegen::naming::capitalize;
///
/// assert_eq!(capitalize("impl"), "Impl");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Append `_` to names that collide with a keyword or the builder receiver.
pub fn escape_identifier(name: &str) -> String {
    if name == RECEIVER || GO_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Parameter name for a struct field.
pub fn param_name(field: &str) -> String {
    escape_identifier(&to_lower_camel(field))
}
