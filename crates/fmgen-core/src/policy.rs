//! Inclusion policy
//!
//! Decides whether a [`StructModel`] gets generated code. A skip marker in the
//! struct's comment always excludes it; otherwise a non-empty [`AllowList`]
//! restricts generation to the names it contains, and an empty or absent one
//! includes everything.

use crate::model::StructModel;
use std::fmt;
use tracing::debug;

/// Comment markers excluding a struct, matched case-insensitively anywhere in
/// the comment text
pub const SKIP_MARKERS: &[&str] = &["fmgen:skip", "fmgen:omit"];

/// Struct names to restrict generation to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    names: Vec<String>,
}

impl AllowList {
    /// Parse a comma-separated list; entries are trimmed and blanks dropped.
    ///
    /// ```
    /// use fmgen_core::AllowList;
    ///
    /// let list = AllowList::parse(" Sample, ,Simple ");
    /// assert!(list.contains("Sample"));
    /// assert!(list.contains("Simple"));
    /// assert!(!list.contains("Other"));
    /// assert!(AllowList::parse(" , ").is_empty());
    /// ```
    pub fn parse(value: &str) -> Self {
        Self::from_names(value.split(','))
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.names.iter().any(|n| n == name)
    }
}

/// Why a struct was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// The struct's comment carries this marker
    SkipMarker(&'static str),
    /// An allow-list was given and the struct is not on it
    NotInAllowList,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::SkipMarker(marker) => write!(f, "comment carries {marker}"),
            ExclusionReason::NotInAllowList => write!(f, "not in allow-list"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Included,
    Excluded(ExclusionReason),
}

impl Decision {
    pub fn is_included(&self) -> bool {
        matches!(self, Decision::Included)
    }
}

/// The skip marker found in a struct's comment, if any.
pub fn skip_marker(model: &StructModel) -> Option<&'static str> {
    let text = model.comment.as_ref()?.text.to_lowercase();
    SKIP_MARKERS.iter().copied().find(|m| text.contains(m))
}

/// Decide one struct.
pub fn evaluate(model: &StructModel, allow_list: Option<&AllowList>) -> Decision {
    if let Some(marker) = skip_marker(model) {
        return Decision::Excluded(ExclusionReason::SkipMarker(marker));
    }

    match allow_list {
        Some(list) if !list.is_empty() && !list.contains(&model.name) => {
            Decision::Excluded(ExclusionReason::NotInAllowList)
        }
        _ => Decision::Included,
    }
}

pub fn is_included(model: &StructModel, allow_list: Option<&AllowList>) -> bool {
    evaluate(model, allow_list).is_included()
}

/// The included structs, in their original order.
pub fn filter<'a>(structs: &'a [StructModel], allow_list: Option<&AllowList>) -> Vec<&'a StructModel> {
    structs
        .iter()
        .filter(|s| match evaluate(s, allow_list) {
            Decision::Included => {
                debug!(name = %s.name, "including struct");
                true
            }
            Decision::Excluded(reason) => {
                debug!(name = %s.name, %reason, "excluding struct");
                false
            }
        })
        .collect()
}
