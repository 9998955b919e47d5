//! `fmgen` struct tag directives

use once_cell::sync::Lazy;
use regex::Regex;

/// Struct tag key holding fmgen directives: `fmgen:"optional,-"`
pub const TAG_KEY: &str = "fmgen";

const SKIP_TOKENS: &[&str] = &["-", "skip", "omit"];
const OPTIONAL_TOKEN: &str = "optional";

// key:"value" pairs separated by whitespace, as reflect.StructTag reads them
#[allow(clippy::expect_used)] // Safe: pattern is a compile-time constant
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"(?:^|\s){TAG_KEY}:"((?:[^"\\]|\\.)*)""#)).expect("valid tag regex")
});

/// Directive tokens found under the `fmgen` key of a field tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directives {
    tokens: Vec<String>,
}

impl Directives {
    /// Parse a field tag literal.
    ///
    /// Accepts the literal as written in source (back-quoted or double-quoted)
    /// or already unquoted. Returns `None` when the tag has no `fmgen` key.
    ///
    /// ```
    /// use fmgen_core::Directives;
    ///
    /// let d = Directives::parse(r#"`db:"id" fmgen:"optional, -"`"#).unwrap();
    /// assert!(d.is_optional());
    /// assert!(d.is_skip());
    /// assert!(Directives::parse(r#"`json:"id"`"#).is_none());
    /// ```
    pub fn parse(raw_tag: &str) -> Option<Self> {
        let tag = unquote(raw_tag);
        let value = TAG_RE.captures(&tag)?.get(1)?.as_str();

        let tokens = value
            .replace("\\\"", "\"")
            .split(',')
            .map(|t| t.trim().to_string())
            .collect();

        Some(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The field is excluded from generated code.
    pub fn is_skip(&self) -> bool {
        self.tokens.iter().any(|t| SKIP_TOKENS.contains(&t.as_str()))
    }

    /// The field gets a setter instead of a constructor parameter.
    pub fn is_optional(&self) -> bool {
        self.tokens.iter().any(|t| t == OPTIONAL_TOKEN)
    }
}

/// Strips the quotes of a Go string literal.
fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix('`').and_then(|r| r.strip_suffix('`')) {
        return inner.to_string();
    }
    if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('t') => out.push('\t'),
                    Some('n') => out.push('\n'),
                    Some(other) => out.push(other),
                    None => {}
                }
            } else {
                out.push(c);
            }
        }
        return out;
    }
    raw.to_string()
}
