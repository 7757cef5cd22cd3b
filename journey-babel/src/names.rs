//! Table-driven spelling and capitalization fixes for names.

use crate::error::TableError;
use serde::{Deserialize, Serialize};

/// A correctly spelled name and the ways it has been misspelled.
///
/// An entry without misspellings only fixes the all-lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub canonical: String,
    #[serde(default)]
    pub misspellings: Vec<String>,
}

impl NameEntry {
    pub fn new<I, S>(canonical: impl Into<String>, misspellings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical: canonical.into(),
            misspellings: misspellings.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered name corrections. Earlier entries win where names overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: Vec<NameEntry>,
}

impl NameTable {
    /// Builds a table, rejecting empty spellings.
    pub fn new(entries: Vec<NameEntry>) -> Result<Self, TableError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.canonical.is_empty() {
                return Err(TableError::EmptyCanonical { index });
            }
            if let Some(position) = entry.misspellings.iter().position(String::is_empty) {
                return Err(TableError::EmptyMisspelling {
                    canonical: entry.canonical.clone(),
                    position,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Applies every entry of `table`, in table order.
///
/// For each entry: the all-lowercase canonical name is capitalized; then for each
/// misspelling, its upper-case form becomes the upper-case canonical name and the
/// misspelling as written, or in lower case, becomes the canonical name. Matching
/// is literal and case-sensitive.
pub fn rewrite_names(text: &str, table: &NameTable) -> String {
    let mut text = text.to_string();
    for entry in &table.entries {
        let canonical_lower = entry.canonical.to_lowercase();
        let canonical_upper = entry.canonical.to_uppercase();
        text = replace_any(&text, &[canonical_lower.as_str()], &entry.canonical);
        for misspelling in &entry.misspellings {
            let upper = misspelling.to_uppercase();
            let lower = misspelling.to_lowercase();
            text = replace_any(&text, &[upper.as_str()], &canonical_upper);
            text = replace_any(&text, &[misspelling.as_str(), lower.as_str()], &entry.canonical);
        }
    }
    text
}

/// Single left-to-right pass replacing whichever needle matches first at each
/// position. Empty needles never match.
fn replace_any(text: &str, needles: &[&str], replacement: &str) -> String {
    let needles: Vec<&str> = needles.iter().copied().filter(|n| !n.is_empty()).collect();
    if needles.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while let Some(ch) = rest.chars().next() {
        for needle in &needles {
            if let Some(after) = rest.strip_prefix(*needle) {
                out.push_str(replacement);
                rest = after;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}
