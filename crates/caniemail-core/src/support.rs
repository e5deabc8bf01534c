//! Support resolution.
//!
//! A feature's per-client version table is reduced to a single [`SupportVerdict`]
//! by reading the support code of the latest version. "Latest" is the
//! lexicographically greatest version key; this is not semver aware, so keys
//! with differing digit counts may misorder.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::catalog::{Feature, VersionTable};
use crate::client::Client;

/// Tri-state support level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Support {
    Full,
    Partial,
    None,
}

impl Support {
    /// Classify a raw support code by its first character.
    pub fn from_code(code: &str) -> Self {
        if code.starts_with('y') {
            Self::Full
        } else if code.starts_with('n') {
            Self::None
        } else {
            Self::Partial
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Support::Full => write!(f, "full"),
            Support::Partial => write!(f, "partial"),
            Support::None => write!(f, "none"),
        }
    }
}

/// The resolved support level for one feature and client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportVerdict {
    pub support: Support,
    /// Footnote numbers in order of appearance; `None` when the code has none.
    pub note_numbers: Option<Vec<u32>>,
}

impl SupportVerdict {
    /// Parse a raw support code such as `y`, `n` or `a #1 #3`.
    pub fn from_code(code: &str) -> Self {
        let numbers = footnotes(code);
        Self {
            support: Support::from_code(code),
            note_numbers: (!numbers.is_empty()).then_some(numbers),
        }
    }

    /// Footnote numbers, empty when there are none.
    pub fn notes(&self) -> &[u32] {
        self.note_numbers.as_deref().unwrap_or_default()
    }
}

/// Resolve a version table to a verdict using its latest version.
///
/// Returns `None` for an empty table: the feature does not apply.
pub fn resolve(table: &VersionTable) -> Option<SupportVerdict> {
    // BTreeMap keys are ordered, so the last entry is the greatest key.
    table
        .iter()
        .next_back()
        .map(|(_, code)| SupportVerdict::from_code(code))
}

/// Resolve a feature for one client.
///
/// Returns `None` when the dataset has no entry for the client.
pub fn resolve_for(feature: &Feature, client: Client) -> Option<SupportVerdict> {
    feature.support_table(client).and_then(resolve)
}

/// Footnote references in a support code: `a #1 #3`.
static FOOTNOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("footnote pattern is valid"));

/// Collect every `#<digits>` token of a support code, in order.
fn footnotes(code: &str) -> Vec<u32> {
    FOOTNOTE_PATTERN
        .captures_iter(code)
        .filter_map(|captures| captures[1].parse().ok())
        .collect()
}
